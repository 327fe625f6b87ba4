mod layout;
mod table;
mod toc;

use std::time::Instant;

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Filter, Name, Pdf, Rect, Ref};

use crate::content::{self, SectionContent};
use crate::fonts::Fonts;
use crate::model::{
    ContentBlock, HeadingCounters, LITERATURE_PARSE_ERROR, PRODUCT_LABEL, PageCursor,
    SELF_CITATION, SectionKind, TableSpec, TocEntry,
};
use crate::store::{SectionStore, section_key};

use layout::{
    CONTENT_WIDTH, FOOTER, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, REFERENCE, SUBTITLE, Surface, TITLE,
    place_block, place_plain, show_centered, show_right_aligned, show_text, wrap_text,
};
use table::flow_table;
use toc::{TocLink, paint_toc};

/// Shown on the title page and in section headings when the plan has no
/// title. Storage keys always use the raw title.
const UNTITLED_FALLBACK: &str = "My Research Study";

const FOOTER_GRAY: f32 = 150.0 / 255.0;
const FOOTER_Y: f32 = PAGE_HEIGHT - 30.0;

/// A finished document plus the layout facts that went into it.
pub struct RenderedPlan {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub toc: Vec<TocEntry>,
    pub references: Vec<String>,
}

/// Lay out and assemble the full plan document: title page, contents page,
/// one or more pages per section, and a references page. The contents page
/// is painted last, once every heading knows its final page.
pub(crate) fn render(title: &str, date: &str, store: &dyn SectionStore) -> RenderedPlan {
    let t0 = Instant::now();

    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };
    let catalog_id = alloc();
    let pages_id = alloc();

    let fonts = Fonts::register(&mut pdf, &mut alloc);

    let mut surface = Surface::new();
    paint_title_page(&mut surface, &fonts, title, date);

    // Reserve the contents page before any section lands.
    surface.add_page();

    let mut counters = HeadingCounters::new();
    let mut toc: Vec<TocEntry> = Vec::new();
    let mut references: Vec<String> = Vec::new();

    for kind in SectionKind::EXPORT_ORDER {
        let page = surface.add_page();
        let mut cursor = PageCursor { page, y: MARGIN };
        cursor = place_block(
            &mut surface,
            &fonts,
            cursor,
            &ContentBlock::Heading { level: 1, text: kind.display_title().to_string() },
            &mut counters,
            &mut toc,
        );

        let stored = store.get(&section_key(title, kind));
        match content::section_content(kind, stored.as_deref()) {
            SectionContent::Lines(text) => {
                cursor = place_lines(&mut surface, &fonts, cursor, &text, &mut counters, &mut toc);
            }
            SectionContent::Table(spec) => {
                cursor = flow_table(&mut surface, &fonts, cursor, &spec, table::ANALYSIS);
            }
            SectionContent::LiteratureError => {
                cursor = place_block(
                    &mut surface,
                    &fonts,
                    cursor,
                    &ContentBlock::Paragraph { text: LITERATURE_PARSE_ERROR.to_string() },
                    &mut counters,
                    &mut toc,
                );
            }
            SectionContent::Literature(lit) => {
                if !lit.key_concepts.is_empty() {
                    cursor = place_block(
                        &mut surface,
                        &fonts,
                        cursor,
                        &ContentBlock::Heading { level: 2, text: "Key Concepts".to_string() },
                        &mut counters,
                        &mut toc,
                    );
                    for concept in &lit.key_concepts {
                        let text = format!("### {}\n{}", concept.concept, concept.note);
                        cursor = place_lines(
                            &mut surface,
                            &fonts,
                            cursor,
                            &text,
                            &mut counters,
                            &mut toc,
                        );
                        cursor.y += 4.0;
                    }
                }
                cursor = place_block(
                    &mut surface,
                    &fonts,
                    cursor,
                    &ContentBlock::Heading { level: 2, text: "Article Summaries".to_string() },
                    &mut counters,
                    &mut toc,
                );
                references.extend(lit.articles.iter().map(|a| a.citation.clone()));
                let spec = TableSpec::from_articles(&lit.articles);
                cursor = flow_table(&mut surface, &fonts, cursor, &spec, table::LITERATURE);
            }
        }
        log::debug!(
            "section {:?} ended at y {:.1} on page {}",
            kind,
            cursor.y,
            cursor.page + 1
        );
    }

    references.push(SELF_CITATION.to_string());
    paint_references(&mut surface, &fonts, &references, &mut counters, &mut toc);

    let mut links: Vec<(usize, TocLink)> = Vec::new();
    paint_toc(&mut surface, &fonts, &toc, &mut links);

    paint_footers(&mut surface, &fonts);

    let t_layout = t0.elapsed();

    // Page count is final; allocate ids and assemble.
    let n = surface.page_count();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let mut page_annot_refs: Vec<Vec<Ref>> = vec![Vec::new(); n];
    for (page_idx, link) in &links {
        let annot_ref = alloc();
        let mut annot = pdf.annotation(annot_ref);
        annot
            .subtype(AnnotationType::Link)
            .rect(link.rect)
            .border(0.0, 0.0, 0.0, None);
        annot
            .action()
            .action_type(ActionType::GoTo)
            .destination()
            .page(page_ids[link.dest_page])
            .xyz(MARGIN, link.dest_top, None);
        page_annot_refs[*page_idx].push(annot_ref);
    }

    for (i, content) in surface.pages.into_iter().enumerate() {
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        let mut resources = page.resources();
        let mut res_fonts = resources.fonts();
        for entry in [&fonts.regular, &fonts.bold] {
            res_fonts.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
        }
    }

    let bytes = pdf.finish();
    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, assembly={:.1}ms, pages={}, toc_entries={}",
        t_layout.as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        n,
        toc.len(),
    );

    RenderedPlan { bytes, page_count: n, toc, references }
}

/// Classify raw section text line by line and place each block in turn.
/// Surrounding whitespace is trimmed first, so leading and trailing blank
/// lines add no vertical space.
fn place_lines(
    surface: &mut Surface,
    fonts: &Fonts,
    mut cursor: PageCursor,
    text: &str,
    counters: &mut HeadingCounters,
    toc: &mut Vec<TocEntry>,
) -> PageCursor {
    for line in text.trim().split('\n') {
        let block = content::classify_line(line);
        cursor = place_block(surface, fonts, cursor, &block, counters, toc);
    }
    cursor
}

fn paint_title_page(surface: &mut Surface, fonts: &Fonts, title: &str, date: &str) {
    let display = if title.trim().is_empty() { UNTITLED_FALLBACK } else { title };

    let title_font = fonts.face(TITLE.bold);
    let lines = wrap_text(display, title_font, TITLE.size, CONTENT_WIDTH);
    let top = PAGE_HEIGHT / 3.0;
    let content = surface.page(0);
    for (i, line) in lines.iter().enumerate() {
        show_centered(content, title_font, TITLE.size, top + i as f32 * 24.0, line);
    }

    let sub_font = fonts.face(SUBTITLE.bold);
    let sub_top = top + lines.len() as f32 * 24.0;
    show_centered(content, sub_font, SUBTITLE.size, sub_top + 20.0, "A Research Plan");
    show_centered(
        content,
        sub_font,
        SUBTITLE.size,
        sub_top + 40.0,
        &format!("Generated by {PRODUCT_LABEL}"),
    );
    show_centered(content, sub_font, SUBTITLE.size, sub_top + 60.0, date);
}

/// The references section gets its own page and the final top-level
/// heading number. Entries are set solid at reference size, no inter-line
/// gap, so long lists stay compact.
fn paint_references(
    surface: &mut Surface,
    fonts: &Fonts,
    references: &[String],
    counters: &mut HeadingCounters,
    toc: &mut Vec<TocEntry>,
) {
    let page = surface.add_page();
    let mut cursor = PageCursor { page, y: MARGIN };
    cursor = place_block(
        surface,
        fonts,
        cursor,
        &ContentBlock::Heading { level: 1, text: "References".to_string() },
        counters,
        toc,
    );
    for (i, entry) in references.iter().enumerate() {
        let line = format!("{}. {}", i + 1, entry);
        cursor = place_plain(surface, fonts, cursor, &line, REFERENCE, 0.0);
    }
}

/// Every page except the title page carries a gray footer: product label
/// on the left, 1-based page number on the right.
fn paint_footers(surface: &mut Surface, fonts: &Fonts) {
    let font = fonts.face(FOOTER.bold);
    for i in 1..surface.page_count() {
        let label = format!("Page {}", i + 1);
        let content = surface.page(i);
        content.set_fill_gray(FOOTER_GRAY);
        show_text(content, font, FOOTER.size, MARGIN, FOOTER_Y, PRODUCT_LABEL);
        show_right_aligned(content, font, FOOTER.size, PAGE_WIDTH - MARGIN, FOOTER_Y, &label);
        content.set_fill_gray(0.0);
    }
}
