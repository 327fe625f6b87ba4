pub mod content;
mod error;
mod fonts;
pub mod model;
mod pdf;
pub mod store;

pub use error::Error;
pub use pdf::RenderedPlan;

use std::path::Path;
use std::time::Instant;

use model::StudyPlan;
use store::{MemoryStore, SectionStore, section_key};

/// Lay out and assemble the plan into a PDF, returning the bytes along
/// with the table of contents and page count that resulted.
pub fn render_plan(plan: &StudyPlan) -> Result<RenderedPlan, Error> {
    let mut store = MemoryStore::new();
    for (kind, text) in &plan.sections {
        store.set(&section_key(&plan.title, *kind), text.clone());
    }
    render_from_store(&plan.title, plan.date.as_deref(), &store)
}

/// Render directly out of a section store, as when the plan was built up
/// section by section rather than supplied whole.
pub fn render_from_store(
    title: &str,
    date: Option<&str>,
    store: &dyn SectionStore,
) -> Result<RenderedPlan, Error> {
    let date = match date {
        Some(d) => d.to_string(),
        None => chrono::Local::now().format("%B %-d, %Y").to_string(),
    };
    Ok(pdf::render(title, &date, store))
}

pub fn export_plan(plan: &StudyPlan, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let rendered = render_plan(plan)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &rendered.bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        rendered.page_count,
        rendered.bytes.len(),
    );

    Ok(())
}

/// Default download name for an exported plan. Whitespace runs collapse to
/// single underscores; an empty title falls back the same way as the title
/// page.
pub fn export_file_name(title: &str) -> String {
    let base = if title.trim().is_empty() { "My Research Study" } else { title.trim() };
    let mut name = String::with_capacity(base.len());
    let mut in_gap = false;
    for ch in base.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                name.push('_');
                in_gap = true;
            }
        } else {
            name.push(ch);
            in_gap = false;
        }
    }
    name.push_str("_study_plan.pdf");
    name
}
