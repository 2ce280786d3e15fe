//! cache_purge tool implementation.
//!
//! Removes expired search cache entries, or the whole cache on request.

use lantern_core::{CacheDb, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Remove every entry, not just expired ones.
    #[serde(default)]
    pub all: bool,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of entries deleted.
    pub deleted: u64,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(
    cache: &CacheDb, max_age_secs: i64, params: CachePurgeParams,
) -> Result<CallToolResult, McpError> {
    let deleted = if params.all {
        cache.purge_all().await?
    } else {
        cache.purge_expired(max_age_secs).await?
    };

    let output = CachePurgeOutput { deleted };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
