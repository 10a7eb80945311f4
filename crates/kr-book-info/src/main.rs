mod assemble;
mod config;
mod error;
mod html;
mod model;
mod normalize;
mod note;
mod parser;
mod pipeline;
mod search;
mod server;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use book_common::http::{HttpClient, HttpClientConfig};

use assemble::SystemClock;
use config::Config;
use note::NoteWriter;
use pipeline::BookPipeline;
use server::BookInfoServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting kr-book-info MCP server");

    let config = Config::from_env()?;
    info!(
        vault_path = %config.vault_path,
        site = %config.site_base_url,
        default_tag = %config.settings.default_tag,
        "configuration loaded"
    );

    let http_config = HttpClientConfig::from_env();
    info!(user_agent = %http_config.user_agent, "http client configured");
    let http = Arc::new(HttpClient::new(http_config)?);

    let pipeline = Arc::new(BookPipeline::new(
        http,
        Arc::new(SystemClock),
        &config.site_base_url,
    ));
    let notes = Arc::new(NoteWriter::new(config.vault_path()));

    let server = BookInfoServer::new(pipeline, notes, config.settings);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
