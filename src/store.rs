//! Per-title section storage and generation preconditions.
//!
//! Content is keyed by a composite of the study title and the canonical
//! section name; each section has a parallel `-critique` key holding the
//! last validation result as JSON. The export path only reads.

use std::collections::HashMap;

use crate::error::Error;
use crate::model::SectionKind;

const KEY_PREFIX: &str = "research-planner";

pub fn section_key(title: &str, kind: SectionKind) -> String {
    format!("{KEY_PREFIX}-{title}-{}", kind.storage_name())
}

pub fn critique_key(title: &str, kind: SectionKind) -> String {
    format!("{}-critique", section_key(title, kind))
}

pub trait SectionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SectionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Delete all content and critique entries stored under a title.
pub fn clear_workspace(title: &str, store: &mut dyn SectionStore) {
    for kind in SectionKind::EXPORT_ORDER {
        store.remove(&section_key(title, kind));
        store.remove(&critique_key(title, kind));
    }
}

/// Upstream sections of `kind` whose stored content is absent or blank.
pub fn missing_dependencies(
    kind: SectionKind,
    title: &str,
    store: &dyn SectionStore,
) -> Vec<SectionKind> {
    kind.dependencies()
        .iter()
        .copied()
        .filter(|dep| {
            store
                .get(&section_key(title, *dep))
                .is_none_or(|v| v.trim().is_empty())
        })
        .collect()
}

/// Check that everything `kind` depends on has stored content. Generation
/// callers run this before starting; a failure aborts the request without
/// any partial write.
pub fn ensure_dependencies(
    kind: SectionKind,
    title: &str,
    store: &dyn SectionStore,
) -> Result<(), Error> {
    let missing = missing_dependencies(kind, title, store);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingInput {
            section: kind.display_title(),
            requires: missing.iter().map(|k| k.display_title()).collect(),
        })
    }
}
