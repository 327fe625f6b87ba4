#![allow(dead_code)]

use studyplan_pdf::model::{SectionKind, StudyPlan};

/// A plan with a pinned date so renders are reproducible across runs.
pub fn minimal_plan() -> StudyPlan {
    let mut plan = StudyPlan::new("Hypertension Screening in Rural Clinics");
    plan.date = Some("March 1, 2026".to_string());
    plan
}

pub fn plan_with(kind: SectionKind, content: impl Into<String>) -> StudyPlan {
    minimal_plan().with_section(kind, content)
}

/// Inflate every FlateDecode content stream in the file and concatenate
/// the results, so tests can check that text made it onto some page.
pub fn inflated_streams(pdf: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(start) = find(pdf, b"stream\n", pos) {
        // Skip "endstream" hits.
        if start >= 3 && &pdf[start - 3..start] == b"end" {
            pos = start + 7;
            continue;
        }
        let data_start = start + 7;
        let Some(end) = find(pdf, b"\nendstream", data_start) else {
            break;
        };
        if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(&pdf[data_start..end]) {
            out.extend_from_slice(&raw);
        }
        pos = end + 10;
    }
    out
}

pub fn streams_contain(pdf: &[u8], needle: &str) -> bool {
    find(&inflated_streams(pdf), needle.as_bytes(), 0).is_some()
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}
