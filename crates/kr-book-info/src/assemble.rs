use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::model::{BookRecord, ExtractedFields, Settings};
use crate::normalize::to_display_title;

/// Reading dates are recorded in Korean Standard Time (UTC+09:00).
const READING_TZ_OFFSET_HOURS: i64 = 9;

const INTRODUCTION_HEADING: &str = "# 책소개";
const TABLE_OF_CONTENTS_HEADING: &str = "# 목차";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Metadata block keys, serialized in field order.
#[derive(Debug, Serialize)]
struct Frontmatter<'a> {
    created: String,
    tag: String,
    title: &'a str,
    author: String,
    category: &'a str,
    total_page: u32,
    publish_date: &'a str,
    cover_url: &'a str,
    status: &'a str,
    start_read_date: String,
    finish_read_date: String,
    my_rate: i64,
    book_note: &'a str,
}

/// Render `fields` into a note body.
///
/// `category` is the second tag: the first one is expected to be the configured default
/// tag. With an empty default tag this picks the second site category instead.
pub fn assemble(
    fields: &ExtractedFields,
    settings: &Settings,
    clock: &dyn Clock,
) -> Result<BookRecord, AppError> {
    let title = fields.full_title();
    let local_now = shifted_now(clock);
    let today = local_now.format("%Y-%m-%d").to_string();

    let frontmatter = Frontmatter {
        created: local_now.format("%Y-%m-%d %H:%M").to_string(),
        tag: fields.category_tags.join(" "),
        title: &title,
        author: fields.authors.join(", "),
        category: fields.category_tags.get(1).map(String::as_str).unwrap_or(""),
        total_page: fields.page_count,
        publish_date: &fields.publish_date,
        cover_url: fields.cover_url.as_deref().unwrap_or(""),
        status: &settings.status,
        start_read_date: today.clone(),
        finish_read_date: today,
        my_rate: parse_rating(&settings.rating_default),
        book_note: &settings.note_default,
    };

    let mut body = format!("---\n{}---\n", serde_yaml::to_string(&frontmatter)?);

    if settings.include_title_heading {
        body.push_str(&format!("\n# {title}"));
    }
    if settings.include_introduction {
        if let Some(introduction) = &fields.introduction {
            body.push_str(&format!("\n\n{INTRODUCTION_HEADING}\n{introduction}"));
        }
    }
    if settings.include_table_of_contents {
        if let Some(table_of_contents) = &fields.table_of_contents {
            body.push_str(&format!(
                "\n\n{TABLE_OF_CONTENTS_HEADING}\n{table_of_contents}"
            ));
        }
    }

    Ok(BookRecord {
        display_title: to_display_title(&title),
        body,
    })
}

fn shifted_now(clock: &dyn Clock) -> NaiveDateTime {
    clock.now().naive_utc() + Duration::hours(READING_TZ_OFFSET_HOURS)
}

fn parse_rating(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        warn!(rating = raw, "rating default is not an integer, using 0");
        0
    })
}
