use crate::normalize::join_title_and_subtitle;

/// Outcome of looking a query up on the bookstore.
///
/// Transport failures are folded into `NotFound`; callers only ever learn whether a
/// detail page location was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Site-relative location of the first listed book, e.g. "/Product/Goods/12345".
    Found(String),
    NotFound,
}

/// Bibliographic fields read from a book detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Cleaned main title.
    pub title: String,
    /// Cleaned subtitle, `None` when the page has none.
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    /// Default tag first (when configured), then site categories. No duplicates.
    pub category_tags: Vec<String>,
    /// Page count, 0 when the page text is not a number.
    pub page_count: u32,
    pub publish_date: String,
    pub cover_url: Option<String>,
    pub introduction: Option<String>,
    pub table_of_contents: Option<String>,
}

impl ExtractedFields {
    /// Main title and subtitle joined with a fullwidth colon.
    pub fn full_title(&self) -> String {
        join_title_and_subtitle(&self.title, self.subtitle.as_deref())
    }
}

/// Per-user defaults merged into every rendered note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_tag: String,
    pub status: String,
    /// Integer rating as typed by the user; rendered as a number.
    pub rating_default: String,
    pub note_default: String,
    pub include_title_heading: bool,
    pub include_introduction: bool,
    pub include_table_of_contents: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tag: "📚독서".to_string(),
            status: "🟩 완료".to_string(),
            rating_default: "0".to_string(),
            note_default: "❌".to_string(),
            include_title_heading: true,
            include_introduction: false,
            include_table_of_contents: false,
        }
    }
}

/// A rendered note ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// Title with site punctuation normalized; still needs filename sanitizing.
    pub display_title: String,
    /// Metadata block followed by the enabled sections.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Success(BookRecord),
    /// Message meant to be shown to the user verbatim.
    Failure(String),
}

impl PipelineResult {
    pub fn into_result(self) -> Result<BookRecord, String> {
        match self {
            PipelineResult::Success(record) => Ok(record),
            PipelineResult::Failure(reason) => Err(reason),
        }
    }
}
