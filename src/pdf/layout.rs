use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontEntry, Fonts, to_winansi_bytes};
use crate::model::{ContentBlock, HeadingCounters, PageCursor, TocEntry};

// A4 portrait with 1-inch margins.
pub(crate) const PAGE_WIDTH: f32 = 595.28;
pub(crate) const PAGE_HEIGHT: f32 = 841.89;
pub(crate) const MARGIN: f32 = 72.0;
pub(crate) const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

pub(crate) const LINE_MULT: f32 = 1.5;
/// Small gap inserted before every classified line.
pub(crate) const LINE_GAP: f32 = 4.0;
const LIST_INDENT: f32 = 20.0;
/// Approximate ascender ratio for Helvetica; converts a block's top edge to
/// its first baseline.
const ASCENDER: f32 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextStyle {
    pub(crate) size: f32,
    pub(crate) bold: bool,
}

pub(crate) const TITLE: TextStyle = TextStyle { size: 24.0, bold: true };
pub(crate) const SUBTITLE: TextStyle = TextStyle { size: 14.0, bold: false };
pub(crate) const H1: TextStyle = TextStyle { size: 16.0, bold: true };
const H2: TextStyle = TextStyle { size: 13.0, bold: true };
const H3: TextStyle = TextStyle { size: 12.0, bold: true };
pub(crate) const BODY: TextStyle = TextStyle { size: 12.0, bold: false };
pub(crate) const REFERENCE: TextStyle = TextStyle { size: 10.0, bold: false };
pub(crate) const FOOTER: TextStyle = TextStyle { size: 8.0, bold: false };

fn heading_style(level: u8) -> TextStyle {
    match level {
        1 => H1,
        2 => H2,
        _ => H3,
    }
}

/// The growing list of page content streams. Page 0 is the title page;
/// page 1 is reserved for the table of contents.
pub(crate) struct Surface {
    pub(crate) pages: Vec<Content>,
}

impl Surface {
    pub(crate) fn new() -> Self {
        Surface {
            pages: vec![Content::new()],
        }
    }

    /// Append a fresh page and return its index.
    pub(crate) fn add_page(&mut self) -> usize {
        self.pages.push(Content::new());
        self.pages.len() - 1
    }

    pub(crate) fn page(&mut self, idx: usize) -> &mut Content {
        &mut self.pages[idx]
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Start a new page if placing `required` points of content at the cursor
/// would cross the bottom margin. New pages are always appended at the end
/// of the document.
pub(crate) fn check_page_break(
    surface: &mut Surface,
    cursor: PageCursor,
    required: f32,
) -> PageCursor {
    if cursor.y + required >= PAGE_HEIGHT - MARGIN {
        let page = surface.add_page();
        PageCursor { page, y: MARGIN }
    } else {
        cursor
    }
}

/// Greedy word wrap against `max_width`. A word wider than the line gets a
/// line of its own; the result always holds at least one (possibly empty)
/// line so callers can charge a line of height for it.
pub(crate) fn wrap_text(
    text: &str,
    font: &FontEntry,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let space_w = font.text_width(" ", font_size);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w: f32 = 0.0;

    for word in text.split_whitespace() {
        let word_w = font.text_width(word, font_size);
        if current.is_empty() {
            current.push_str(word);
            current_w = word_w;
        } else if current_w + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_w = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_w += space_w + word_w;
        }
    }
    lines.push(current);
    lines
}

/// Baseline for text whose top edge sits `y_top` points below the page top.
fn baseline(y_top: f32, font_size: f32) -> f32 {
    PAGE_HEIGHT - y_top - font_size * ASCENDER
}

pub(crate) fn show_text(
    content: &mut Content,
    font: &FontEntry,
    font_size: f32,
    x: f32,
    y_top: f32,
    text: &str,
) {
    content
        .begin_text()
        .set_font(Name(font.pdf_name.as_bytes()), font_size)
        .next_line(x, baseline(y_top, font_size))
        .show(Str(&to_winansi_bytes(text)))
        .end_text();
}

pub(crate) fn show_wrapped(
    content: &mut Content,
    font: &FontEntry,
    font_size: f32,
    x: f32,
    y_top: f32,
    lines: &[String],
) {
    for (i, line) in lines.iter().enumerate() {
        show_text(
            content,
            font,
            font_size,
            x,
            y_top + i as f32 * font_size * LINE_MULT,
            line,
        );
    }
}

pub(crate) fn show_centered(
    content: &mut Content,
    font: &FontEntry,
    font_size: f32,
    y_top: f32,
    text: &str,
) {
    let x = (PAGE_WIDTH - font.text_width(text, font_size)) / 2.0;
    show_text(content, font, font_size, x, y_top, text);
}

pub(crate) fn show_right_aligned(
    content: &mut Content,
    font: &FontEntry,
    font_size: f32,
    x_right: f32,
    y_top: f32,
    text: &str,
) {
    let x = x_right - font.text_width(text, font_size);
    show_text(content, font, font_size, x, y_top, text);
}

/// Wrap, page-break, paint and advance one run of text at `style`, indented
/// by `indent` from the left margin. No ambient line gap is added.
pub(crate) fn place_plain(
    surface: &mut Surface,
    fonts: &Fonts,
    cursor: PageCursor,
    text: &str,
    style: TextStyle,
    indent: f32,
) -> PageCursor {
    let font = fonts.face(style.bold);
    let lines = wrap_text(text, font, style.size, CONTENT_WIDTH - indent);
    let height = lines.len() as f32 * style.size * LINE_MULT;
    let mut cursor = check_page_break(surface, cursor, height);
    show_wrapped(
        surface.page(cursor.page),
        font,
        style.size,
        MARGIN + indent,
        cursor.y,
        &lines,
    );
    cursor.y += height;
    cursor
}

/// Place one classified block at the cursor and return the advanced cursor.
///
/// Headings are numbered through `counters` and recorded in `toc` with the
/// post-break page and pre-advance y, so the entry points at the heading's
/// top. Blank blocks advance a fixed half body line and never trigger a
/// page break on their own.
pub(crate) fn place_block(
    surface: &mut Surface,
    fonts: &Fonts,
    cursor: PageCursor,
    block: &ContentBlock,
    counters: &mut HeadingCounters,
    toc: &mut Vec<TocEntry>,
) -> PageCursor {
    let mut cursor = cursor;
    cursor.y += LINE_GAP;

    match block {
        ContentBlock::Blank => {
            cursor.y += BODY.size / 2.0;
            cursor
        }
        ContentBlock::Heading { level, text } => {
            let style = heading_style(*level);
            let number = counters.emit(*level);
            // Top-level headings carry a trailing dot: "3. Methodology".
            let full = if *level == 1 {
                format!("{number}. {text}")
            } else {
                format!("{number} {text}")
            };
            let font = fonts.face(style.bold);
            let lines = wrap_text(&full, font, style.size, CONTENT_WIDTH);
            let height = lines.len() as f32 * style.size * LINE_MULT;
            let mut cursor = check_page_break(surface, cursor, height);
            toc.push(TocEntry {
                title: full.clone(),
                page: cursor.page + 1,
                level: *level,
                anchor_y: cursor.y,
            });
            show_wrapped(
                surface.page(cursor.page),
                font,
                style.size,
                MARGIN,
                cursor.y,
                &lines,
            );
            cursor.y += height;
            cursor
        }
        ContentBlock::Bullet { text } => place_list_item(surface, fonts, cursor, "\u{2022}", text),
        ContentBlock::NumberedItem { marker, text } => {
            place_list_item(surface, fonts, cursor, marker, text)
        }
        ContentBlock::BoldLine { text } => place_plain(
            surface,
            fonts,
            cursor,
            text,
            TextStyle { size: BODY.size, bold: true },
            0.0,
        ),
        ContentBlock::Paragraph { text } => {
            place_plain(surface, fonts, cursor, text, BODY, 0.0)
        }
    }
}

/// Bullet and numbered items: marker at the margin, text indented and
/// wrapped within the remaining width.
fn place_list_item(
    surface: &mut Surface,
    fonts: &Fonts,
    cursor: PageCursor,
    marker: &str,
    text: &str,
) -> PageCursor {
    let font = fonts.face(BODY.bold);
    let lines = wrap_text(text, font, BODY.size, CONTENT_WIDTH - LIST_INDENT);
    let height = lines.len() as f32 * BODY.size * LINE_MULT;
    let mut cursor = check_page_break(surface, cursor, height);
    show_text(
        surface.page(cursor.page),
        font,
        BODY.size,
        MARGIN,
        cursor.y,
        marker,
    );
    show_wrapped(
        surface.page(cursor.page),
        font,
        BODY.size,
        MARGIN + LIST_INDENT,
        cursor.y,
        &lines,
    );
    cursor.y += height;
    cursor
}
