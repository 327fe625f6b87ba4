//! Classification of stored section content into renderable blocks.
//!
//! Section content arrives as markdown-flavored plain text (or, for the
//! literature review, JSON). Classification works line by line with fixed
//! precedence; inline emphasis markers inside paragraph text are passed
//! through unprocessed.

use crate::model::{
    ContentBlock, LiteratureReview, NO_CONTENT_PLACEHOLDER, SectionKind, TableSpec,
};

/// Classify one line of raw text. The first matching rule wins: H3, H2, H1,
/// bullet, numbered item, bold-wrapped line, blank, paragraph.
pub fn classify_line(line: &str) -> ContentBlock {
    if let Some(rest) = line.strip_prefix("### ") {
        return ContentBlock::Heading {
            level: 3,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return ContentBlock::Heading {
            level: 2,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return ContentBlock::Heading {
            level: 1,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        return ContentBlock::Bullet {
            text: rest.to_string(),
        };
    }
    if let Some((marker, text)) = split_numbered(line) {
        return ContentBlock::NumberedItem {
            marker: marker.to_string(),
            text: text.to_string(),
        };
    }
    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        return ContentBlock::BoldLine {
            text: line[2..line.len() - 2].to_string(),
        };
    }
    if line.trim().is_empty() {
        return ContentBlock::Blank;
    }
    ContentBlock::Paragraph {
        text: line.to_string(),
    }
}

/// Split a "12. item" list line into its verbatim marker and the item text.
fn split_numbered(line: &str) -> Option<(&str, &str)> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let text = rest.strip_prefix(". ")?;
    Some((&line[..digits + 1], text))
}

/// Parse a pipe-delimited markdown table. Returns `None` unless the content
/// yields at least one header and one data row.
///
/// Lines without a pipe are ignored; the second pipe line is assumed to be
/// the separator row. Rows shorter than the header are padded with empty
/// cells; rows longer than the header are dropped.
pub fn parse_pipe_table(markdown: &str) -> Option<TableSpec> {
    if !markdown.contains('|') {
        return None;
    }

    let lines: Vec<&str> = markdown
        .trim()
        .lines()
        .filter(|line| line.contains('|'))
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let headers: Vec<String> = split_cells(lines[0]);
    if headers.is_empty() {
        return None;
    }

    let mut rows: Vec<Vec<String>> = lines[2..]
        .iter()
        .map(|line| split_cells(line))
        .filter(|row| !row.is_empty() && row.len() <= headers.len())
        .collect();
    if rows.is_empty() {
        return None;
    }

    for row in &mut rows {
        row.resize(headers.len(), String::new());
    }

    Some(TableSpec { headers, rows })
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_literature(json: &str) -> Result<LiteratureReview, serde_json::Error> {
    serde_json::from_str(json)
}

/// The shape a section's stored content resolved to, decided once per
/// section before rendering.
#[derive(Clone, Debug)]
pub enum SectionContent {
    Literature(LiteratureReview),
    LiteratureError,
    Table(TableSpec),
    Lines(String),
}

/// Resolve a section's stored value into its renderable shape. Missing or
/// empty content always resolves to the placeholder paragraph — every
/// section produces a page.
pub fn section_content(kind: SectionKind, stored: Option<&str>) -> SectionContent {
    let content = match stored {
        Some(s) if !s.is_empty() => s,
        _ => NO_CONTENT_PLACEHOLDER,
    };

    match kind {
        SectionKind::LiteratureReview if content != NO_CONTENT_PLACEHOLDER => {
            match parse_literature(content) {
                Ok(lit) => SectionContent::Literature(lit),
                Err(e) => {
                    log::warn!("literature review content is not valid JSON: {e}");
                    SectionContent::LiteratureError
                }
            }
        }
        SectionKind::Analysis if content.contains('|') => match parse_pipe_table(content) {
            Some(spec) => SectionContent::Table(spec),
            None => SectionContent::Lines(content.to_string()),
        },
        _ => SectionContent::Lines(content.to_string()),
    }
}
