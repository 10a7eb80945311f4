use book_common::http::{encode_query, FetchText};
use tracing::{debug, info, warn};

use crate::html::{HtmlDocument, Locator, ParsedDocument};
use crate::model::SearchResult;

/// Search catalogs on the bookstore, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// 국내도서
    DomesticBooks,
    /// 통합검색
    AllCategories,
}

impl SearchScope {
    pub const FALLBACK_ORDER: [SearchScope; 2] =
        [SearchScope::DomesticBooks, SearchScope::AllCategories];

    fn domain(self) -> &'static str {
        match self {
            SearchScope::DomesticBooks => "BOOK",
            SearchScope::AllCategories => "ALL",
        }
    }
}

pub fn search_url(base_url: &str, scope: SearchScope, query: &str) -> String {
    format!(
        "{}/Product/Search?domain={}&query={}",
        base_url.trim_end_matches('/'),
        scope.domain(),
        encode_query(query)
    )
}

/// Find the detail page location of the first book listed for `query`.
///
/// The domestic catalog is searched first; the full catalog is only queried after that
/// request has finished without a result. Transport errors count as "no result".
pub async fn resolve(fetcher: &dyn FetchText, base_url: &str, query: &str) -> SearchResult {
    let query = query.trim();
    for scope in SearchScope::FALLBACK_ORDER {
        if let Some(location) = search_scope(fetcher, base_url, scope, query).await {
            info!(query, scope = ?scope, location = %location, "book found");
            return SearchResult::Found(location);
        }
        debug!(query, scope = ?scope, "no result in scope");
    }
    SearchResult::NotFound
}

async fn search_scope(
    fetcher: &dyn FetchText,
    base_url: &str,
    scope: SearchScope,
    query: &str,
) -> Option<String> {
    let url = search_url(base_url, scope, query);
    match fetcher.fetch_text(&url).await {
        Ok(text) => first_result_location(&text),
        Err(e) => {
            warn!(query, scope = ?scope, error = %e, "search request failed");
            None
        }
    }
}

/// A listed result counts as found even without an `href`; the empty location then fails
/// at the detail fetch instead of falling through to the next scope.
fn first_result_location(text: &str) -> Option<String> {
    let doc = HtmlDocument::parse(text);
    let link = doc.select_first(Locator::FirstSearchResult)?;
    Some(link.attr("href").unwrap_or_default().trim().to_string())
}
