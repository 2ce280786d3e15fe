//! web_search tool implementation.
//!
//! Runs the search pipeline: cache lookup, results page fetch, extraction.

use lantern_client::SearchService;
use lantern_core::{Error, Hit};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for web_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Search query (required).
    pub query: String,

    /// Serve fresh cached results and store new ones (default true).
    #[serde(default = "default_true")]
    pub use_cache: bool,
}

fn default_true() -> bool {
    true
}

/// Output structure for web_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchOutput {
    /// The search results.
    pub results: Vec<Hit>,
}

/// Implementation of the web_search tool.
pub async fn search_impl(search: &SearchService, params: WebSearchParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let results = search.search(&params.query, params.use_cache).await;
    let output = WebSearchOutput { results };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_client::{FetchClient, FetchConfig, SearchConfig};
    use lantern_core::CacheDb;

    /// Service whose endpoint never answers, so hits can only come from
    /// the cache.
    async fn offline_service() -> (SearchService, CacheDb) {
        let fetcher = FetchClient::new(FetchConfig::default()).unwrap();
        let cache = CacheDb::open_in_memory().await.unwrap();
        let config = SearchConfig { endpoint: "http://127.0.0.1:1/".to_string(), ..Default::default() };
        (SearchService::new(fetcher, cache.clone(), config), cache)
    }

    fn output_from(result: &CallToolResult) -> WebSearchOutput {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_empty_query() {
        let (service, _cache) = offline_service().await;
        let params = WebSearchParams { query: "".into(), use_cache: true };

        let result = search_impl(&service, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_whitespace_query() {
        let (service, _cache) = offline_service().await;
        let params = WebSearchParams { query: "   ".into(), use_cache: true };

        let result = search_impl(&service, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failed_search_returns_empty_results() {
        let (service, _cache) = offline_service().await;
        let params = WebSearchParams { query: "rust ownership".into(), use_cache: false };

        let result = search_impl(&service, params).await.unwrap();
        let output = output_from(&result);
        assert!(output.results.is_empty());
    }

    #[tokio::test]
    async fn test_serves_cached_results() {
        let (service, cache) = offline_service().await;
        let hits = vec![Hit {
            title: "Cached".to_string(),
            snippet: "From the cache.".to_string(),
            url: "https://cached.example/".to_string(),
        }];
        cache.put_results("rust ownership", &hits).await.unwrap();

        let params = WebSearchParams { query: "rust ownership".into(), use_cache: true };
        let result = search_impl(&service, params).await.unwrap();
        let output = output_from(&result);
        assert_eq!(output.results, hits);
    }
}
