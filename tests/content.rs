use studyplan_pdf::content::{SectionContent, classify_line, section_content};
use studyplan_pdf::model::{ContentBlock, NO_CONTENT_PLACEHOLDER, SectionKind};

#[test]
fn heading_markers_win_over_everything_else() {
    assert_eq!(
        classify_line("# Overview"),
        ContentBlock::Heading { level: 1, text: "Overview".to_string() }
    );
    assert_eq!(
        classify_line("## Background"),
        ContentBlock::Heading { level: 2, text: "Background".to_string() }
    );
    assert_eq!(
        classify_line("### Detail"),
        ContentBlock::Heading { level: 3, text: "Detail".to_string() }
    );
}

#[test]
fn both_bullet_markers_are_recognized() {
    assert_eq!(
        classify_line("* item"),
        ContentBlock::Bullet { text: "item".to_string() }
    );
    assert_eq!(
        classify_line("- item"),
        ContentBlock::Bullet { text: "item".to_string() }
    );
    // No trailing space, no bullet.
    assert_eq!(
        classify_line("-item"),
        ContentBlock::Paragraph { text: "-item".to_string() }
    );
}

#[test]
fn numbered_items_keep_their_marker() {
    assert_eq!(
        classify_line("12. Later step"),
        ContentBlock::NumberedItem { marker: "12.".to_string(), text: "Later step".to_string() }
    );
    assert_eq!(
        classify_line("1.No space"),
        ContentBlock::Paragraph { text: "1.No space".to_string() }
    );
}

#[test]
fn bold_lines_need_markers_on_both_ends() {
    assert_eq!(
        classify_line("**Aim**"),
        ContentBlock::BoldLine { text: "Aim".to_string() }
    );
    // Too short to hold both markers and content.
    assert_eq!(
        classify_line("**"),
        ContentBlock::Paragraph { text: "**".to_string() }
    );
    assert_eq!(
        classify_line("**unterminated"),
        ContentBlock::Paragraph { text: "**unterminated".to_string() }
    );
}

#[test]
fn whitespace_only_lines_are_blank() {
    assert_eq!(classify_line(""), ContentBlock::Blank);
    assert_eq!(classify_line("   \t"), ContentBlock::Blank);
}

#[test]
fn missing_sections_resolve_to_the_placeholder() {
    for stored in [None, Some("")] {
        match section_content(SectionKind::Introduction, stored) {
            SectionContent::Lines(text) => assert_eq!(text, NO_CONTENT_PLACEHOLDER),
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}

#[test]
fn only_the_analysis_section_parses_pipe_tables() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |";
    assert!(matches!(
        section_content(SectionKind::Analysis, Some(md)),
        SectionContent::Table(_)
    ));
    assert!(matches!(
        section_content(SectionKind::Methodology, Some(md)),
        SectionContent::Lines(_)
    ));
}
