//! Queryable view over a fetched bookstore page.
//!
//! The pipeline never sees CSS. It asks for a [`Locator`] and gets back owned [`Node`]
//! snapshots, so the extractor can run against hand-built documents and the `scraper`
//! tree never outlives a synchronous call.
use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Fixed positions on the bookstore's search and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Link of the first entry on a search results page.
    FirstSearchResult,
    Title,
    Subtitle,
    CategoryTags,
    Authors,
    /// Authors hidden behind the "more" toggle.
    AdditionalAuthors,
    /// Second row of the specifications table ("352쪽 | 130*188mm").
    PageCount,
    PublishDate,
    CoverImage,
    Introduction,
    TableOfContents,
}

impl Locator {
    fn css(self) -> &'static str {
        match self {
            Locator::FirstSearchResult => {
                "#yesSchList > li:nth-child(1) > div > div.item_info > div.info_row.info_name > a.gd_name"
            }
            Locator::Title => "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > div > h2",
            Locator::Subtitle => "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > div > h3",
            Locator::CategoryTags => {
                "#infoset_goodsCate > div.infoSetCont_wrap > dl:nth-child(1) > dd > ul > li > a"
            }
            Locator::Authors => {
                "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > span.gd_pubArea > span.gd_auth > a"
            }
            Locator::AdditionalAuthors => {
                "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > span.gd_pubArea > span.gd_auth > span > span.moreAuthLi > span > ul > li > a"
            }
            Locator::PageCount => {
                "#infoset_specific > div.infoSetCont_wrap > div > table > tbody > tr:nth-child(2) > td"
            }
            Locator::PublishDate => {
                "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > span.gd_pubArea > span.gd_date"
            }
            Locator::CoverImage => "#yDetailTopWrap > div.topColLft > div > span > em > img",
            Locator::Introduction => {
                "#infoset_introduce > div.infoSetCont_wrap > div.infoWrap_txt > div"
            }
            Locator::TableOfContents => "#infoset_toc > div.infoSetCont_wrap > div.infoWrap_txt",
        }
    }

    fn selector(self) -> Option<Selector> {
        match Selector::parse(self.css()) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!(locator = ?self, error = %e, "invalid selector");
                None
            }
        }
    }
}

/// Text and attributes of one matched element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    text: String,
    attrs: HashMap<String, String>,
}

impl Node {
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

pub trait ParsedDocument {
    fn select_all(&self, locator: Locator) -> Vec<Node>;

    fn select_first(&self, locator: Locator) -> Option<Node> {
        self.select_all(locator).into_iter().next()
    }
}

/// `scraper`-backed document. Not `Send`; parse and query it without awaiting in between.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }
}

impl ParsedDocument for HtmlDocument {
    fn select_all(&self, locator: Locator) -> Vec<Node> {
        let Some(selector) = locator.selector() else {
            return Vec::new();
        };
        self.html.select(&selector).map(to_node).collect()
    }

    fn select_first(&self, locator: Locator) -> Option<Node> {
        let selector = locator.selector()?;
        self.html.select(&selector).next().map(to_node)
    }
}

fn to_node(element: ElementRef<'_>) -> Node {
    Node {
        text: element.text().collect(),
        attrs: element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    }
}
