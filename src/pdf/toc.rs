use pdf_writer::Rect;

use crate::fonts::Fonts;
use crate::model::{PageCursor, TocEntry};

use super::layout::{
    BODY, CONTENT_WIDTH, H1, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, Surface, check_page_break,
    show_right_aligned, show_text, wrap_text,
};

/// Internal link annotation gathered while painting the contents page.
/// `dest_page` is a 0-based surface index; `dest_top` is already converted
/// to PDF bottom-up coordinates.
pub(crate) struct TocLink {
    pub(crate) rect: Rect,
    pub(crate) dest_page: usize,
    pub(crate) dest_top: f32,
}

const ENTRY_ADVANCE: f32 = 20.0;
const INDENT_PER_LEVEL: f32 = 20.0;
/// Minimum clearance between the dot leader and the page number column.
const NUMBER_CLEARANCE: f32 = 20.0;

const ENTRY_BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const LEADER_GRAY: f32 = 100.0 / 255.0;

/// Paint the table of contents onto the reserved second page. Entries that
/// overflow continue on pages appended at the end of the document, matching
/// how every other page break works.
pub(crate) fn paint_toc(
    surface: &mut Surface,
    fonts: &Fonts,
    toc: &[TocEntry],
    links: &mut Vec<(usize, TocLink)>,
) {
    let mut cursor = PageCursor { page: 1, y: MARGIN };

    let h1 = fonts.face(H1.bold);
    show_text(surface.page(cursor.page), h1, H1.size, MARGIN, cursor.y, "Contents");
    cursor.y += 40.0;

    let body = fonts.face(false);
    let dot_w = body.text_width(".", BODY.size);

    for entry in toc {
        let indent = (entry.level.saturating_sub(1)) as f32 * INDENT_PER_LEVEL;
        let page_label = entry.page.to_string();
        let title_w = body.text_width(&entry.title, BODY.size);

        let lines = wrap_text(&entry.title, body, BODY.size, CONTENT_WIDTH - indent);
        let height = lines.len() as f32 * ENTRY_ADVANCE;
        cursor = check_page_break(surface, cursor, height);

        let x = MARGIN + indent;
        let content = surface.page(cursor.page);

        content.set_fill_rgb(ENTRY_BLUE[0], ENTRY_BLUE[1], ENTRY_BLUE[2]);
        for (i, line) in lines.iter().enumerate() {
            show_text(
                content,
                body,
                BODY.size,
                x,
                cursor.y + i as f32 * ENTRY_ADVANCE,
                line,
            );
        }

        content.set_fill_gray(LEADER_GRAY);
        let dots_room = CONTENT_WIDTH - indent - title_w - NUMBER_CLEARANCE;
        let dot_count = (dots_room / dot_w).floor().max(0.0) as usize;
        if dot_count > 0 {
            show_text(
                content,
                body,
                BODY.size,
                x + title_w,
                cursor.y,
                &".".repeat(dot_count),
            );
        }
        show_right_aligned(
            content,
            body,
            BODY.size,
            PAGE_WIDTH - MARGIN,
            cursor.y,
            &page_label,
        );
        content.set_fill_gray(0.0);

        // Clickable region over the title text of the first line.
        let base = PAGE_HEIGHT - cursor.y - BODY.size * 0.75;
        links.push((
            cursor.page,
            TocLink {
                rect: Rect::new(
                    x,
                    base - BODY.size * 0.2,
                    x + title_w.min(CONTENT_WIDTH - indent),
                    base + BODY.size * 0.8,
                ),
                dest_page: entry.page - 1,
                dest_top: PAGE_HEIGHT - entry.anchor_y,
            },
        ));

        cursor.y += height;
    }
}
