//! Search orchestration: cache, fetch, extract.
//!
//! A search consults the result cache first, fetches the results page on
//! a miss, extracts hits, and writes non-empty hit lists back to the
//! cache. Failures at any stage degrade to an empty result list; the
//! conversation surface never sees a search error.

use lantern_core::{AppConfig, CacheDb, Hit};
use tracing::{debug, warn};
use url::Url;

use crate::fetch::{FetchClient, FetchError};
use crate::serp;
use crate::text;

/// Tunables for the search pipeline.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Results endpoint; the query is appended as the `q` parameter.
    pub endpoint: String,
    /// Hit cap per search.
    pub max_results: usize,
    /// Character cap for page text extraction.
    pub max_page_chars: usize,
    /// Cache freshness window in seconds.
    pub cache_max_age_secs: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            max_results: 5,
            max_page_chars: 3000,
            cache_max_age_secs: 3600,
        }
    }
}

impl From<&AppConfig> for SearchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            endpoint: config.search_endpoint.clone(),
            max_results: config.max_results,
            max_page_chars: config.max_page_chars,
            cache_max_age_secs: config.cache_max_age_secs,
        }
    }
}

/// Web search pipeline.
///
/// Owns its fetch client and cache handle; build once at startup and
/// share behind the server state.
pub struct SearchService {
    fetcher: FetchClient,
    cache: CacheDb,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(fetcher: FetchClient, cache: CacheDb, config: SearchConfig) -> Self {
        Self { fetcher, cache, config }
    }

    /// Build the results page URL for a query.
    pub fn search_url(&self, query: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.config.endpoint, &[("q", query)])
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    /// Run a search, returning up to `max_results` hits.
    ///
    /// With `use_cache`, a fresh cached entry short-circuits the network
    /// entirely and a successful non-empty extraction is written back.
    /// Network or extraction problems yield an empty list.
    pub async fn search(&self, query: &str, use_cache: bool) -> Vec<Hit> {
        if use_cache {
            match self.cache.get_results(query, self.config.cache_max_age_secs).await {
                Ok(Some(hits)) => {
                    debug!("cache hit for query: {}", query);
                    return hits;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("cache lookup failed: {}", e);
                }
            }
        }

        let url = match self.search_url(query) {
            Ok(url) => url,
            Err(e) => {
                warn!("failed to build search URL: {}", e);
                return Vec::new();
            }
        };

        let response = match self.fetcher.fetch(url.as_str()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("search fetch failed: {}", e);
                return Vec::new();
            }
        };

        let hits = serp::extract_hits(&response.text(), self.config.max_results);

        if use_cache
            && !hits.is_empty()
            && let Err(e) = self.cache.put_results(query, &hits).await
        {
            warn!("failed to cache search results: {}", e);
        }

        hits
    }

    /// Fetch a page and return its visible text, capped at the configured
    /// character count.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.fetcher.fetch(url).await?;
        Ok(text::visible_text(&response.text(), self.config.max_page_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchConfig;
    use crate::serp::SEVEN_RESULT_PAGE;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve one HTTP response on an ephemeral loopback port.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/")
    }

    async fn service_with_endpoint(endpoint: &str) -> (SearchService, CacheDb) {
        let fetcher = FetchClient::new(FetchConfig { block_private_hosts: false, ..Default::default() }).unwrap();
        let cache = CacheDb::open_in_memory().await.unwrap();
        let config = SearchConfig { endpoint: endpoint.to_string(), ..Default::default() };
        (SearchService::new(fetcher, cache.clone(), config), cache)
    }

    fn seeded_hits() -> Vec<Hit> {
        vec![
            Hit {
                title: "Cached title".to_string(),
                snippet: "Cached snippet.".to_string(),
                url: "https://cached.example/".to_string(),
            },
            Hit {
                title: "Second cached".to_string(),
                snippet: "More cached text.".to_string(),
                url: "https://cached.example/two".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_search_url_encodes_query() {
        let (service, _cache) = service_with_endpoint("https://html.duckduckgo.com/html/").await;
        let url = service.search_url("rust ownership").unwrap();
        assert_eq!(url.as_str(), "https://html.duckduckgo.com/html/?q=rust+ownership");
    }

    #[tokio::test]
    async fn test_search_url_escapes_specials() {
        let (service, _cache) = service_with_endpoint("https://html.duckduckgo.com/html/").await;
        let url = service.search_url("c++ & rust?").unwrap();
        assert_eq!(url.query(), Some("q=c%2B%2B+%26+rust%3F"));
    }

    #[tokio::test]
    async fn test_search_extracts_hits() {
        let endpoint = serve_once("200 OK", SEVEN_RESULT_PAGE.to_string()).await;
        let (service, _cache) = service_with_endpoint(&endpoint).await;

        let hits = service.search("rust ownership", false).await;
        assert_eq!(hits.len(), 5);
        for hit in &hits {
            assert!(!hit.title.is_empty());
            assert!(!hit.url.is_empty());
        }
    }

    #[tokio::test]
    async fn test_search_unreachable_endpoint_is_empty() {
        let (service, _cache) = service_with_endpoint("http://127.0.0.1:1/").await;
        let hits = service.search("rust ownership", false).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error_is_empty() {
        let endpoint = serve_once("500 Internal Server Error", "oops".to_string()).await;
        let (service, _cache) = service_with_endpoint(&endpoint).await;

        let hits = service.search("rust ownership", false).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_prefers_fresh_cache() {
        // Endpoint is unreachable, so hits can only come from the cache.
        let (service, cache) = service_with_endpoint("http://127.0.0.1:1/").await;
        cache.put_results("rust ownership", &seeded_hits()).await.unwrap();

        let hits = service.search("rust ownership", true).await;
        assert_eq!(hits, seeded_hits());
    }

    #[tokio::test]
    async fn test_search_populates_cache() {
        let endpoint = serve_once("200 OK", SEVEN_RESULT_PAGE.to_string()).await;
        let (service, cache) = service_with_endpoint(&endpoint).await;

        let hits = service.search("rust ownership", true).await;
        assert_eq!(hits.len(), 5);

        let cached = cache.get_results("rust ownership", 3600).await.unwrap().unwrap();
        assert_eq!(cached, hits);
    }

    #[tokio::test]
    async fn test_search_without_cache_skips_store() {
        let endpoint = serve_once("200 OK", SEVEN_RESULT_PAGE.to_string()).await;
        let (service, cache) = service_with_endpoint(&endpoint).await;

        let hits = service.search("rust ownership", false).await;
        assert_eq!(hits.len(), 5);
        assert!(!cache.has_entry("rust ownership").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_empty_extraction_not_cached() {
        let endpoint = serve_once("200 OK", "<html><body><p>no results</p></body></html>".to_string()).await;
        let (service, cache) = service_with_endpoint(&endpoint).await;

        let hits = service.search("rust ownership", true).await;
        assert!(hits.is_empty());
        assert!(!cache.has_entry("rust ownership").await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_page_extracts_text() {
        let body = "<html><head><script>var x = 1;</script></head>\
                    <body><p>Hello   World</p></body></html>";
        let endpoint = serve_once("200 OK", body.to_string()).await;
        let (service, _cache) = service_with_endpoint(&endpoint).await;

        let text = service.fetch_page(&endpoint).await.unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_fetch_page_propagates_status() {
        let endpoint = serve_once("404 Not Found", "gone".to_string()).await;
        let (service, _cache) = service_with_endpoint(&endpoint).await;

        let result = service.fetch_page(&endpoint).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }
}
