use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LookupBookParams {
    /// Book title to search for, usually a note's file name without extension.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddBookInfoParams {
    /// Path of the markdown note, relative to the configured vault root.
    pub note_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LookupBookResponse {
    /// Book title with site punctuation normalized, suitable for display.
    pub title: String,
    /// Rendered metadata block followed by the enabled sections.
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddBookInfoResponse {
    pub title: String,
    /// New path of the note, relative to the vault root.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SettingsResponse {
    pub default_tag: String,
    pub status: String,
    pub my_rate: String,
    pub book_note: String,
    pub toggle_title: bool,
    pub toggle_introduction: bool,
    pub toggle_index: bool,
}
