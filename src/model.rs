use std::collections::BTreeMap;

use serde::Deserialize;

/// One named unit of the output document, with independently stored content.
/// The variants are listed in canonical export order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum SectionKind {
    Introduction,
    LiteratureReview,
    Objectives,
    Methodology,
    SampleSize,
    DataCollection,
    Analysis,
}

impl SectionKind {
    pub const EXPORT_ORDER: [SectionKind; 7] = [
        SectionKind::Introduction,
        SectionKind::LiteratureReview,
        SectionKind::Objectives,
        SectionKind::Methodology,
        SectionKind::SampleSize,
        SectionKind::DataCollection,
        SectionKind::Analysis,
    ];

    /// Name used in storage keys and plan JSON.
    pub fn storage_name(self) -> &'static str {
        match self {
            SectionKind::Introduction => "Introduction",
            SectionKind::LiteratureReview => "LiteratureReview",
            SectionKind::Objectives => "Objectives",
            SectionKind::Methodology => "Methodology",
            SectionKind::SampleSize => "SampleSize",
            SectionKind::DataCollection => "DataCollection",
            SectionKind::Analysis => "Analysis",
        }
    }

    /// Heading shown in the exported document.
    pub fn display_title(self) -> &'static str {
        match self {
            SectionKind::Introduction => "Introduction",
            SectionKind::LiteratureReview => "Review of Literature",
            SectionKind::Objectives => "SMART Objectives",
            SectionKind::Methodology => "Study Design & Methodology",
            SectionKind::SampleSize => "Sample Size Statement",
            SectionKind::DataCollection => "Data Collection Plan",
            SectionKind::Analysis => "Analysis Plan",
        }
    }

    /// Upstream sections whose content must exist before this section can be
    /// generated. Export does not consult this; generation callers do.
    pub fn dependencies(self) -> &'static [SectionKind] {
        match self {
            SectionKind::Methodology => &[SectionKind::Objectives],
            SectionKind::SampleSize | SectionKind::DataCollection => &[SectionKind::Methodology],
            SectionKind::Analysis => &[SectionKind::Objectives, SectionKind::Methodology],
            _ => &[],
        }
    }
}

/// A complete plan description: the study title plus whatever section content
/// has been stored so far. Sections may be absent; export substitutes a
/// placeholder paragraph for them.
#[derive(Clone, Debug, Deserialize)]
pub struct StudyPlan {
    pub title: String,
    /// Date line printed on the title page. Defaults to today when absent;
    /// pin it to make exports byte-reproducible.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub sections: BTreeMap<SectionKind, String>,
}

impl StudyPlan {
    pub fn new(title: impl Into<String>) -> Self {
        StudyPlan {
            title: title.into(),
            date: None,
            sections: BTreeMap::new(),
        }
    }

    pub fn with_section(mut self, kind: SectionKind, content: impl Into<String>) -> Self {
        self.sections.insert(kind, content.into());
        self
    }
}

/// One classified, renderable unit of text within a section.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    Bullet { text: String },
    /// The marker text ("3.") is preserved verbatim, not renumbered.
    NumberedItem { marker: String, text: String },
    BoldLine { text: String },
    Paragraph { text: String },
    Blank,
}

/// One recorded heading reference used to populate the table of contents.
/// `page` is the 1-based physical page active when the heading was placed;
/// `anchor_y` is the heading's top edge, measured down from the page top.
#[derive(Clone, Debug, PartialEq)]
pub struct TocEntry {
    pub title: String,
    pub page: usize,
    pub level: u8,
    pub anchor_y: f32,
}

/// Hierarchical heading counters. Incrementing a level resets the deeper
/// ones, so the displayed numbers follow document order: 1, 1.1, 1.2, 2, 2.1.
/// Initialized once per export invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadingCounters {
    h1: u32,
    h2: u32,
    h3: u32,
}

impl HeadingCounters {
    pub fn new() -> Self {
        HeadingCounters::default()
    }

    /// Advance the counter for `level` (1..=3, deeper levels clamp to 3) and
    /// return the dot-joined display number, e.g. "2" or "2.1.3".
    pub fn emit(&mut self, level: u8) -> String {
        match level {
            1 => {
                self.h1 += 1;
                self.h2 = 0;
                self.h3 = 0;
                format!("{}", self.h1)
            }
            2 => {
                self.h2 += 1;
                self.h3 = 0;
                format!("{}.{}", self.h1, self.h2)
            }
            _ => {
                self.h3 += 1;
                format!("{}.{}.{}", self.h1, self.h2, self.h3)
            }
        }
    }
}

/// A parsed table: ordered headers plus rows already padded to the header
/// length.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// Project articles onto the fixed summary columns.
    pub fn from_articles(articles: &[Article]) -> TableSpec {
        TableSpec {
            headers: ["Title", "Author", "Year", "Design", "Summary"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: articles
                .iter()
                .map(|a| {
                    vec![
                        a.title.clone(),
                        a.author.clone(),
                        a.year.clone(),
                        a.study_design.clone(),
                        a.summary.clone(),
                    ]
                })
                .collect(),
        }
    }
}

/// One summarized article from the literature-review producer (read-only to
/// this crate). Citations are appended to the references list in article
/// order.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub author: String,
    pub year: String,
    pub study_design: String,
    pub citation: String,
    pub summary: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct KeyConcept {
    pub concept: String,
    pub note: String,
}

/// The structured content stored for the literature-review section. Other
/// keys in the stored JSON (e.g. the synthesized introduction) are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteratureReview {
    #[serde(default)]
    pub key_concepts: Vec<KeyConcept>,
    pub articles: Vec<Article>,
}

/// The single piece of mutable layout state: the current page (0-based index
/// into the page list) and the vertical offset measured down from the page
/// top. Threaded through every render call by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageCursor {
    pub page: usize,
    pub y: f32,
}

/// Placeholder rendered for a section whose stored content is missing or
/// empty.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content generated.";

/// Paragraph rendered when literature-review JSON fails to parse.
pub const LITERATURE_PARSE_ERROR: &str = "Error parsing literature review data.";

/// Product label stamped into page footers.
pub const PRODUCT_LABEL: &str = "Research Planner";

/// Fixed trailing entry of every references list.
pub const SELF_CITATION: &str =
    "B, Arjun., & Pakhare, Abhijit P. (2024). Research Planner (Version 1.0) [Computer software].";
