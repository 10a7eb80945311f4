//! Field extraction for a bookstore detail page.
//!
//! Every field except the title is optional on the page. Missing optional fields fall back
//! to empty values (`0` pages, empty date, `None` for cover and sections) so a thin page
//! still yields a usable note. Only a missing title aborts extraction.
use regex::Regex;
use tracing::debug;

use crate::html::{Locator, ParsedDocument};
use crate::model::ExtractedFields;
use crate::normalize::clean_title;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("title node not found")]
    MissingTitle,
}

/// Read every bibliographic field from `doc`.
///
/// `default_tag` seeds the tag list when non-empty, ahead of the site's categories.
pub fn extract_fields(
    doc: &impl ParsedDocument,
    default_tag: &str,
) -> Result<ExtractedFields, ExtractError> {
    let title = doc
        .select_first(Locator::Title)
        .map(|node| clean_title(node.text()))
        .ok_or(ExtractError::MissingTitle)?;

    let subtitle = doc
        .select_first(Locator::Subtitle)
        .map(|node| clean_title(node.text()))
        .filter(|s| !s.is_empty());

    let category_tags = collect_tags(doc, default_tag);
    let authors = collect_authors(doc);

    let page_count = doc
        .select_first(Locator::PageCount)
        .map(|node| parse_page_count(node.text()))
        .unwrap_or(0);

    let publish_date = doc
        .select_first(Locator::PublishDate)
        .map(|node| parse_publish_date(node.text()))
        .unwrap_or_default();

    let cover_url = doc
        .select_first(Locator::CoverImage)
        .and_then(|node| node.attr("src").map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());

    let introduction = section_text(doc, Locator::Introduction);
    let table_of_contents = section_text(doc, Locator::TableOfContents);

    debug!(
        title = %title,
        authors = authors.len(),
        tags = category_tags.len(),
        page_count,
        "extracted book fields"
    );

    Ok(ExtractedFields {
        title,
        subtitle,
        authors,
        category_tags,
        page_count,
        publish_date,
        cover_url,
        introduction,
        table_of_contents,
    })
}

fn collect_tags(doc: &impl ParsedDocument, default_tag: &str) -> Vec<String> {
    let mut tags = Vec::new();
    if !default_tag.is_empty() {
        push_unique(&mut tags, default_tag.to_string());
    }
    for node in doc.select_all(Locator::CategoryTags) {
        let tag: String = node.text().chars().filter(|c| !c.is_whitespace()).collect();
        if !tag.is_empty() {
            push_unique(&mut tags, tag);
        }
    }
    tags
}

fn collect_authors(doc: &impl ParsedDocument) -> Vec<String> {
    let mut authors = Vec::new();
    let nodes = doc
        .select_all(Locator::Authors)
        .into_iter()
        .chain(doc.select_all(Locator::AdditionalAuthors));
    for node in nodes {
        let author = node.text().trim();
        if !author.is_empty() {
            push_unique(&mut authors, author.to_string());
        }
    }
    authors
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// `"352쪽 | 130*188mm"` → 352. Anything that is not a number once the unit is dropped
/// counts as 0.
pub fn parse_page_count(text: &str) -> u32 {
    let first = text.trim().split(' ').next().unwrap_or_default();
    drop_last_char(first).parse().unwrap_or(0)
}

/// `"2021년 03월 15일"` → `"2021-03-15"`.
pub fn parse_publish_date(text: &str) -> String {
    text.split_whitespace()
        .map(drop_last_char)
        .collect::<Vec<_>>()
        .join("-")
}

fn drop_last_char(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next_back();
    chars.as_str()
}

fn section_text(doc: &impl ParsedDocument, locator: Locator) -> Option<String> {
    let text = clean_section_text(doc.select_first(locator)?.text());
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Flatten the escaped markup the site embeds in long-form sections.
///
/// Line-break tags become CRLF, bold tags and `[ ] * #` are dropped, and every line is
/// trimmed and terminated with `\n`.
pub fn clean_section_text(text: &str) -> String {
    let line_break_re = Regex::new(r"<br>|<br/>|<br />").expect("valid regex");
    let markup_re = Regex::new(r"<b>|<B>|</b>|</B>|\[|\]|\*|#").expect("valid regex");

    let text = line_break_re.replace_all(text, "\r\n");
    let text = markup_re.replace_all(&text, "");
    text.split('\n')
        .map(|line| format!("{}\n", line.trim()))
        .collect()
}
