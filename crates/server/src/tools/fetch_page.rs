//! fetch_page tool implementation.
//!
//! Fetches a page through the safety-gated client and returns its visible
//! text. Unlike web_search, failures here surface as structured tool
//! errors with per-variant codes.

use lantern_client::SearchService;
use lantern_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for fetch_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchPageParams {
    /// Page URL (required). Scheme defaults to https when missing.
    pub url: String,
}

/// Output structure for fetch_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchPageOutput {
    /// Extracted visible text, capped at the configured length.
    pub content: String,
}

/// Implementation of the fetch_page tool.
pub async fn fetch_page_impl(search: &SearchService, params: FetchPageParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let content = search
        .fetch_page(&params.url)
        .await
        .map_err(|e| McpError::from(Error::from(e)))?;

    let output = FetchPageOutput { content };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
