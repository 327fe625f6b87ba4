use studyplan_pdf::Error;
use studyplan_pdf::model::SectionKind;
use studyplan_pdf::store::{
    MemoryStore, SectionStore, clear_workspace, critique_key, ensure_dependencies,
    missing_dependencies, section_key,
};

#[test]
fn keys_embed_the_plan_title_and_section_name() {
    assert_eq!(
        section_key("My Study", SectionKind::Objectives),
        "research-planner-My Study-Objectives"
    );
    assert_eq!(
        critique_key("My Study", SectionKind::Objectives),
        "research-planner-My Study-Objectives-critique"
    );
}

#[test]
fn clearing_a_workspace_removes_sections_and_critiques() {
    let mut store = MemoryStore::new();
    store.set(&section_key("A", SectionKind::Introduction), "intro".into());
    store.set(&critique_key("A", SectionKind::Introduction), "weak".into());
    store.set(&section_key("B", SectionKind::Introduction), "other plan".into());

    clear_workspace("A", &mut store);

    assert!(store.get(&section_key("A", SectionKind::Introduction)).is_none());
    assert!(store.get(&critique_key("A", SectionKind::Introduction)).is_none());
    assert_eq!(
        store.get(&section_key("B", SectionKind::Introduction)).as_deref(),
        Some("other plan")
    );
}

#[test]
fn blank_content_counts_as_missing_for_dependencies() {
    let mut store = MemoryStore::new();
    store.set(&section_key("A", SectionKind::Objectives), "   ".into());

    let missing = missing_dependencies(SectionKind::Methodology, "A", &store);
    assert_eq!(missing, vec![SectionKind::Objectives]);
}

#[test]
fn satisfied_dependencies_pass() {
    let mut store = MemoryStore::new();
    store.set(&section_key("A", SectionKind::Objectives), "1. Measure X.".into());
    store.set(&section_key("A", SectionKind::Methodology), "Cross-sectional.".into());

    assert!(ensure_dependencies(SectionKind::Analysis, "A", &store).is_ok());
}

#[test]
fn unmet_dependencies_name_the_missing_sections() {
    let store = MemoryStore::new();
    let err = ensure_dependencies(SectionKind::Analysis, "A", &store).unwrap_err();

    match err {
        Error::MissingInput { section, requires } => {
            assert_eq!(section, "Analysis Plan");
            assert_eq!(requires, vec!["SMART Objectives", "Study Design & Methodology"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sections_without_prerequisites_never_block() {
    let store = MemoryStore::new();
    assert!(ensure_dependencies(SectionKind::Introduction, "A", &store).is_ok());
    assert!(ensure_dependencies(SectionKind::LiteratureReview, "A", &store).is_ok());
}
