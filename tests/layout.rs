mod common;

use studyplan_pdf::model::{NO_CONTENT_PLACEHOLDER, SectionKind};
use studyplan_pdf::render_plan;

#[test]
fn empty_sections_fall_back_to_the_placeholder() {
    let rendered = render_plan(&common::minimal_plan()).unwrap();
    assert!(common::streams_contain(&rendered.bytes, NO_CONTENT_PLACEHOLDER));
}

#[test]
fn long_sections_flow_onto_continuation_pages() {
    let body: String = (1..=60)
        .map(|i| format!("Point {i}."))
        .collect::<Vec<_>>()
        .join("\n");
    let rendered = render_plan(&common::plan_with(SectionKind::Introduction, body)).unwrap();

    // The heading ends 100pt down; each short paragraph costs 22pt, so the
    // 31st line crosses the bottom margin and opens a continuation page.
    assert_eq!(rendered.page_count, 11);

    let intro = rendered.toc.iter().find(|e| e.title == "1. Introduction").unwrap();
    assert_eq!(intro.page, 3);

    // Continuation pages are appended at the end of the document, so the
    // next section starts two pages after the one the heading landed on.
    let literature = rendered
        .toc
        .iter()
        .find(|e| e.title == "2. Review of Literature")
        .unwrap();
    assert_eq!(literature.page, 5);

    assert!(common::streams_contain(&rendered.bytes, "Point 60."));
}

#[test]
fn blank_lines_never_trigger_a_page_break() {
    // 200 interior blank lines advance far past the page bottom, but blanks
    // are spacing only; the following paragraph breaks to a fresh page.
    let body = format!("Opening.{}Closing remark.", "\n".repeat(200));
    let rendered = render_plan(&common::plan_with(SectionKind::Introduction, body)).unwrap();

    assert_eq!(rendered.page_count, 11);
    assert!(common::streams_contain(&rendered.bytes, "Closing remark."));
}

#[test]
fn surrounding_blank_lines_cost_no_space() {
    let bare = common::plan_with(SectionKind::Introduction, "Only paragraph.");
    let padded =
        common::plan_with(SectionKind::Introduction, "\n\n\nOnly paragraph.\n\n\n");

    let a = render_plan(&bare).unwrap();
    let b = render_plan(&padded).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn bullets_and_numbered_items_render_their_text() {
    let body = "* First consideration\n- Second consideration\n1. Enumerated step";
    let rendered = render_plan(&common::plan_with(SectionKind::DataCollection, body)).unwrap();

    assert!(common::streams_contain(&rendered.bytes, "First consideration"));
    assert!(common::streams_contain(&rendered.bytes, "Second consideration"));
    assert!(common::streams_contain(&rendered.bytes, "Enumerated step"));
}

#[test]
fn every_page_after_the_title_carries_a_footer() {
    let rendered = render_plan(&common::minimal_plan()).unwrap();
    let text = common::inflated_streams(&rendered.bytes);
    let text = String::from_utf8_lossy(&text);

    assert!(text.contains("Page 2"));
    assert!(text.contains("Page 10"));
    assert!(!text.contains("Page 1)"));

    // Nine footers, the title-page credit line, and the self citation.
    assert_eq!(text.matches("Research Planner").count(), 11);
}
