use pdf_writer::Content;

use crate::fonts::{FontEntry, Fonts};
use crate::model::{NO_CONTENT_PLACEHOLDER, PageCursor, TableSpec};

use super::layout::{
    BODY, CONTENT_WIDTH, LINE_GAP, MARGIN, PAGE_HEIGHT, Surface, check_page_break, place_plain,
    show_text, wrap_text,
};

#[derive(Clone, Copy, Debug)]
pub(crate) struct TableStyle {
    pub(crate) font_size: f32,
    pub(crate) cell_pad: f32,
}

/// Dense style for article summary tables.
pub(crate) const LITERATURE: TableStyle = TableStyle { font_size: 8.0, cell_pad: 2.0 };
/// Roomier style for analysis plan tables.
pub(crate) const ANALYSIS: TableStyle = TableStyle { font_size: 10.0, cell_pad: 5.0 };

/// Teal header band, white text.
const HEADER_FILL: [f32; 3] = [7.0 / 255.0, 136.0 / 255.0, 135.0 / 255.0];
const BORDER_GRAY: f32 = 0.5;

/// Start from an equal split, then widen columns whose longest unbreakable
/// word would not fit and shrink the others proportionally to compensate.
fn auto_fit_columns(spec: &TableSpec, font: &FontEntry, font_size: f32, pad: f32) -> Vec<f32> {
    let cols = spec.headers.len();
    let equal = CONTENT_WIDTH / cols as f32;
    let mut widths = vec![equal; cols];

    let mut min_widths = vec![0.0f32; cols];
    for row in std::iter::once(&spec.headers).chain(spec.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            for word in cell.split_whitespace() {
                let w = font.text_width(word, font_size) + 2.0 * pad;
                if w > min_widths[i] {
                    min_widths[i] = w;
                }
            }
        }
    }

    let mut deficit = 0.0;
    let mut slack = 0.0;
    for i in 0..cols {
        if min_widths[i] > equal {
            deficit += min_widths[i] - equal;
            widths[i] = min_widths[i];
        } else {
            slack += equal - min_widths[i];
        }
    }
    if deficit > 0.0 && slack > 0.0 {
        let scale = (deficit / slack).min(1.0);
        for i in 0..cols {
            if min_widths[i] <= equal {
                widths[i] -= (equal - min_widths[i]) * scale;
            }
        }
    }
    widths
}

fn wrap_cells(
    row: &[String],
    widths: &[f32],
    font: &FontEntry,
    style: TableStyle,
) -> Vec<Vec<String>> {
    row.iter()
        .enumerate()
        .map(|(i, cell)| wrap_text(cell, font, style.font_size, widths[i] - 2.0 * style.cell_pad))
        .collect()
}

fn row_height(cells: &[Vec<String>], style: TableStyle) -> f32 {
    let line_h = style.font_size * 1.2;
    let max_lines = cells.iter().map(Vec::len).max().unwrap_or(1);
    max_lines as f32 * line_h + 2.0 * style.cell_pad
}

fn draw_row(
    content: &mut Content,
    font: &FontEntry,
    style: TableStyle,
    widths: &[f32],
    cells: &[Vec<String>],
    y_top: f32,
    height: f32,
    header: bool,
) {
    let line_h = style.font_size * 1.2;

    if header {
        content
            .set_fill_rgb(HEADER_FILL[0], HEADER_FILL[1], HEADER_FILL[2])
            .rect(MARGIN, PAGE_HEIGHT - y_top - height, CONTENT_WIDTH, height)
            .fill_nonzero();
    }

    // Cell borders.
    let mut x = MARGIN;
    content.set_stroke_gray(BORDER_GRAY).set_line_width(0.5);
    for w in widths {
        content
            .rect(x, PAGE_HEIGHT - y_top - height, *w, height)
            .stroke();
        x += w;
    }

    if header {
        content.set_fill_gray(1.0);
    }
    let mut x = MARGIN;
    for (i, lines) in cells.iter().enumerate() {
        for (j, line) in lines.iter().enumerate() {
            show_text(
                content,
                font,
                style.font_size,
                x + style.cell_pad,
                y_top + style.cell_pad + j as f32 * line_h,
                line,
            );
        }
        x += widths[i];
    }
    if header {
        content.set_fill_gray(0.0);
    }
}

/// Flow a table down the page, breaking between rows and repeating the
/// header band at the top of each continuation page. Returns the cursor
/// just below the last row. A table with no rows degrades to the standard
/// placeholder paragraph.
pub(crate) fn flow_table(
    surface: &mut Surface,
    fonts: &Fonts,
    cursor: PageCursor,
    spec: &TableSpec,
    style: TableStyle,
) -> PageCursor {
    if spec.rows.is_empty() {
        let mut cursor = cursor;
        cursor.y += LINE_GAP;
        return place_plain(surface, fonts, cursor, NO_CONTENT_PLACEHOLDER, BODY, 0.0);
    }

    let body_font = fonts.face(false);
    let header_font = fonts.face(true);
    let widths = auto_fit_columns(spec, body_font, style.font_size, style.cell_pad);

    let header_cells = wrap_cells(&spec.headers, &widths, header_font, style);
    let header_h = row_height(&header_cells, style);

    let mut cursor = cursor;
    cursor.y += LINE_GAP;
    cursor = check_page_break(surface, cursor, header_h);
    draw_row(
        surface.page(cursor.page),
        header_font,
        style,
        &widths,
        &header_cells,
        cursor.y,
        header_h,
        true,
    );
    cursor.y += header_h;

    for (idx, row) in spec.rows.iter().enumerate() {
        let cells = wrap_cells(row, &widths, body_font, style);
        let height = row_height(&cells, style);
        let broken = check_page_break(surface, cursor, height);
        if broken.page != cursor.page {
            cursor = broken;
            draw_row(
                surface.page(cursor.page),
                header_font,
                style,
                &widths,
                &header_cells,
                cursor.y,
                header_h,
                true,
            );
            cursor.y += header_h;
        }
        log::debug!("table row {idx}: height {height:.1} on page {}", cursor.page + 1);
        draw_row(
            surface.page(cursor.page),
            body_font,
            style,
            &widths,
            &cells,
            cursor.y,
            height,
            false,
        );
        cursor.y += height;
    }
    cursor
}
