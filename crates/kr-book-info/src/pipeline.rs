use std::sync::Arc;

use book_common::http::{join_url, FetchText};
use tracing::{info, warn};

use crate::assemble::{assemble, Clock};
use crate::error::AppError;
use crate::html::HtmlDocument;
use crate::model::{BookRecord, ExtractedFields, PipelineResult, SearchResult, Settings};
use crate::parser::{extract_fields, ExtractError};
use crate::search::resolve;

/// Shown for any failure after a detail page location was found.
///
/// Transport, extraction and rendering failures share this message; the cause is only
/// logged.
pub const BOOK_INFO_ERROR: &str = "Get book info error occured";

/// Search → fetch → extract → assemble, one request at a time.
pub struct BookPipeline {
    fetcher: Arc<dyn FetchText>,
    clock: Arc<dyn Clock>,
    base_url: String,
}

impl BookPipeline {
    pub fn new(fetcher: Arc<dyn FetchText>, clock: Arc<dyn Clock>, base_url: &str) -> Self {
        Self {
            fetcher,
            clock,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn run(&self, query: &str, settings: &Settings) -> PipelineResult {
        let location = match resolve(self.fetcher.as_ref(), &self.base_url, query).await {
            SearchResult::Found(location) => location,
            SearchResult::NotFound => {
                info!(query, "no book matched in any scope");
                return PipelineResult::Failure(format!("{query} url not found"));
            }
        };

        match self.fetch_book(&location, settings).await {
            Ok(record) => {
                info!(query, title = %record.display_title, "book info assembled");
                PipelineResult::Success(record)
            }
            Err(e) => {
                warn!(query, location = %location, error = %e, "book info lookup failed");
                PipelineResult::Failure(BOOK_INFO_ERROR.to_string())
            }
        }
    }

    async fn fetch_book(&self, location: &str, settings: &Settings) -> Result<BookRecord, AppError> {
        let url = join_url(&self.base_url, location)?;
        let text = self.fetcher.fetch_text(&url).await?;
        let fields = extract_from_html(&text, &settings.default_tag)?;
        assemble(&fields, settings, self.clock.as_ref())
    }
}

fn extract_from_html(text: &str, default_tag: &str) -> Result<ExtractedFields, ExtractError> {
    let doc = HtmlDocument::parse(text);
    extract_fields(&doc, default_tag)
}
