mod common;

use studyplan_pdf::model::{SELF_CITATION, SectionKind};
use studyplan_pdf::render_plan;

#[test]
fn minimal_plan_has_ten_pages() {
    let rendered = render_plan(&common::minimal_plan()).unwrap();

    // Title, contents, seven sections, references.
    assert_eq!(rendered.page_count, 10);
    assert_eq!(rendered.references, vec![SELF_CITATION.to_string()]);
}

#[test]
fn every_section_lands_in_the_contents() {
    let rendered = render_plan(&common::minimal_plan()).unwrap();

    let titles: Vec<&str> = rendered.toc.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "1. Introduction",
            "2. Review of Literature",
            "3. SMART Objectives",
            "4. Study Design & Methodology",
            "5. Sample Size Statement",
            "6. Data Collection Plan",
            "7. Analysis Plan",
            "8. References",
        ]
    );
    assert!(rendered.toc.iter().all(|e| e.level == 1));

    // Sections occupy one page each, starting right after the contents page.
    let pages: Vec<usize> = rendered.toc.iter().map(|e| e.page).collect();
    assert_eq!(pages, vec![3, 4, 5, 6, 7, 8, 9, 10]);
}

#[test]
fn subheadings_are_numbered_within_their_section() {
    let content = "Intro paragraph.\n## Background\nSome context.\n## Rationale\nWhy now.";
    let rendered =
        render_plan(&common::plan_with(SectionKind::Introduction, content)).unwrap();

    let titles: Vec<&str> = rendered.toc.iter().map(|e| e.title.as_str()).collect();
    assert!(titles.contains(&"1.1 Background"));
    assert!(titles.contains(&"1.2 Rationale"));

    let background = rendered.toc.iter().find(|e| e.title == "1.1 Background").unwrap();
    assert_eq!(background.level, 2);
    assert_eq!(background.page, 3);
}

#[test]
fn contents_entries_render_with_dot_leaders() {
    let rendered = render_plan(&common::minimal_plan()).unwrap();
    let text = common::inflated_streams(&rendered.bytes);
    let text = String::from_utf8_lossy(&text);

    assert!(text.contains("Contents"));
    assert!(text.contains("....."));
}

#[test]
fn rendering_is_deterministic_for_a_pinned_date() {
    let plan = common::plan_with(SectionKind::Objectives, "1. Measure X.\n2. Measure Y.");
    let a = render_plan(&plan).unwrap();
    let b = render_plan(&plan).unwrap();

    assert_eq!(a.page_count, b.page_count);
    assert_eq!(a.toc, b.toc);
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn untitled_plan_still_renders_with_fallback_title() {
    let mut plan = common::minimal_plan();
    plan.title = String::new();
    let rendered = render_plan(&plan).unwrap();

    assert_eq!(rendered.page_count, 10);
    assert!(common::streams_contain(&rendered.bytes, "My Research Study"));
}
