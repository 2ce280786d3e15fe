//! lantern server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use lantern_client::{FetchClient, FetchConfig, SearchConfig, SearchService};
use lantern_core::{AppConfig, CacheDb, ChatProcessor, KnowledgeDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let cache = CacheDb::open(&config.cache_db_path).await?;
    let knowledge = KnowledgeDb::open(&config.knowledge_db_path).await?;

    let fetcher = FetchClient::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
        ..Default::default()
    })?;
    let search = SearchService::new(fetcher, cache.clone(), SearchConfig::from(&config));

    // No inference backend is wired in yet; chat degrades to its notice reply.
    let chat = ChatProcessor::new(None, config.modes.clone());

    tracing::info!("Starting lantern server on stdio transport");

    let handler = handler::AssistantServer::new(config, cache, knowledge, search, chat);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
