use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use book_common::mcp_api::{
    AddBookInfoParams, AddBookInfoResponse, LookupBookParams, LookupBookResponse,
    SettingsResponse,
};

use crate::model::Settings;
use crate::note::NoteWriter;
use crate::pipeline::BookPipeline;

#[derive(Clone)]
pub struct BookInfoServer {
    pipeline: Arc<BookPipeline>,
    notes: Arc<NoteWriter>,
    settings: Arc<Settings>,
    tool_router: ToolRouter<BookInfoServer>,
}

impl BookInfoServer {
    pub fn new(pipeline: Arc<BookPipeline>, notes: Arc<NoteWriter>, settings: Settings) -> Self {
        Self {
            pipeline,
            notes,
            settings: Arc::new(settings),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl BookInfoServer {
    #[tool(description = "Look up a book on YES24 by title and return the rendered note metadata without touching any file.")]
    async fn lookup_book(
        &self,
        Parameters(params): Parameters<LookupBookParams>,
    ) -> Result<Json<LookupBookResponse>, String> {
        if params.query.trim().is_empty() {
            return Err("query must not be empty".to_string());
        }

        let record = self
            .pipeline
            .run(&params.query, &self.settings)
            .await
            .into_result()?;

        Ok(Json(LookupBookResponse {
            title: record.display_title,
            body: record.body,
        }))
    }

    #[tool(description = "Fill a markdown note with YES24 book info: searches by the note's file name, prepends the metadata block and renames the note to the book title.")]
    async fn add_book_info(
        &self,
        Parameters(params): Parameters<AddBookInfoParams>,
    ) -> Result<Json<AddBookInfoResponse>, String> {
        let note = self.notes.locate(&params.note_path).map_err(|e| e.to_string())?;
        let query = NoteWriter::query_for(&note);
        info!(note = %params.note_path, query = %query, "add_book_info tool invoked");

        let record = self
            .pipeline
            .run(&query, &self.settings)
            .await
            .into_result()?;

        let target = self
            .notes
            .apply(&note, &record)
            .await
            .map_err(|e| format!("failed to update note: {e}"))?;

        Ok(Json(AddBookInfoResponse {
            title: record.display_title,
            path: self.notes.relative(&target),
        }))
    }

    #[tool(description = "Show the defaults (tag, status, rating, note, section toggles) applied to every rendered note.")]
    async fn get_settings(&self) -> Result<Json<SettingsResponse>, String> {
        let settings = self.settings.as_ref();
        Ok(Json(SettingsResponse {
            default_tag: settings.default_tag.clone(),
            status: settings.status.clone(),
            my_rate: settings.rating_default.clone(),
            book_note: settings.note_default.clone(),
            toggle_title: settings.include_title_heading,
            toggle_introduction: settings.include_introduction,
            toggle_index: settings.include_table_of_contents,
        }))
    }
}

#[tool_handler]
impl ServerHandler for BookInfoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "kr-book-info".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Korean book info MCP server. Use add_book_info with a vault-relative note path \
                 to search YES24 by the note's file name, prepend a metadata block and rename the \
                 note to the book title. Use lookup_book to preview the rendered metadata for a \
                 title, and get_settings to inspect the configured defaults."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BookInfoServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = BookInfoServer::tool_router().list_all();
        for name in ["lookup_book", "add_book_info", "get_settings"] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }
}
