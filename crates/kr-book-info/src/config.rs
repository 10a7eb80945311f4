use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::model::Settings;

const DEFAULT_SITE_BASE_URL: &str = "http://www.yes24.com";

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the notes vault. Tool paths are resolved against it.
    pub vault_path: String,
    /// Bookstore origin used for search and detail pages.
    pub site_base_url: String,
    /// Defaults merged into every rendered note.
    pub settings: Settings,
}

impl Config {
    /// Required:
    /// - `BOOK_VAULT_PATH`: directory holding the markdown notes
    ///
    /// Optional:
    /// - `BOOK_SITE_BASE_URL`: bookstore origin (default "http://www.yes24.com")
    /// - `BOOK_DEFAULT_TAG`, `BOOK_STATUS`, `BOOK_MY_RATE`, `BOOK_NOTE`
    /// - `BOOK_TOGGLE_TITLE`, `BOOK_TOGGLE_INTRODUCTION`, `BOOK_TOGGLE_INDEX`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vault_path = lookup("BOOK_VAULT_PATH").ok_or_else(|| {
            AppError::Config("BOOK_VAULT_PATH environment variable is required".to_string())
        })?;

        if !Path::new(&vault_path).is_dir() {
            return Err(AppError::Config(format!(
                "vault directory not found: {vault_path}"
            )));
        }

        let site_base_url = lookup("BOOK_SITE_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_BASE_URL.to_string());

        let defaults = Settings::default();
        let settings = Settings {
            default_tag: lookup("BOOK_DEFAULT_TAG").unwrap_or(defaults.default_tag),
            status: lookup("BOOK_STATUS").unwrap_or(defaults.status),
            rating_default: lookup("BOOK_MY_RATE").unwrap_or(defaults.rating_default),
            note_default: lookup("BOOK_NOTE").unwrap_or(defaults.note_default),
            include_title_heading: parse_toggle(
                "BOOK_TOGGLE_TITLE",
                lookup("BOOK_TOGGLE_TITLE"),
                defaults.include_title_heading,
            )?,
            include_introduction: parse_toggle(
                "BOOK_TOGGLE_INTRODUCTION",
                lookup("BOOK_TOGGLE_INTRODUCTION"),
                defaults.include_introduction,
            )?,
            include_table_of_contents: parse_toggle(
                "BOOK_TOGGLE_INDEX",
                lookup("BOOK_TOGGLE_INDEX"),
                defaults.include_table_of_contents,
            )?,
        };

        Ok(Self {
            vault_path,
            site_base_url,
            settings,
        })
    }

    pub fn vault_path(&self) -> PathBuf {
        Path::new(&self.vault_path).to_path_buf()
    }
}

fn parse_toggle(key: &str, value: Option<String>, default: bool) -> Result<bool, AppError> {
    let Some(raw) = value else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
