//! HTTP fetch pipeline with URL canonicalization and private-host protection.
//!
//! ### URL Canonicalization
//! - Trim whitespace, ensure scheme (default: `https`)
//! - Lowercase host, remove fragments
//! - Preserve query string
//!
//! ### Safety Gates
//! - Deny private ranges (RFC1918, link-local, localhost, etc.)
//! - Max redirects: 5
//!
//! Every failure maps to a distinct [`FetchError`] variant.

pub mod ssrf;

use bytes::Bytes;
use reqwest::Url;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};

use lantern_core::Error;

/// Fetch pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// URL failed to parse or uses a non-http(s) scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Host points at private or reserved address space.
    #[error("blocked host: {0}")]
    Blocked(String),

    /// The request ran past the configured timeout.
    #[error("timed out fetching {0}")]
    Timeout(String),

    /// Upstream answered with a non-success status.
    #[error("status {status} from {url}")]
    Status { status: u16, url: String },

    /// Transport failure below HTTP.
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl(msg) => Error::InvalidUrl(msg),
            FetchError::Blocked(msg) => Error::Blocked(msg),
            FetchError::Timeout(url) => Error::FetchTimeout(url),
            FetchError::Status { status, .. } => Error::HttpStatus(status),
            FetchError::Network(e) => Error::Network(e.to_string()),
        }
    }
}

/// Canonicalize a URL string for consistent fetching and safety checks.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<Url, FetchError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl("empty URL".to_string()));
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = Url::parse(&url_str).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(FetchError::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase)
        && parsed.host_str() != Some(host.as_str())
    {
        parsed
            .set_host(Some(&host))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "lantern/0.1")
    pub user_agent: String,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,

    /// Whether to refuse private and reserved hosts (default: true)
    pub block_private_hosts: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "lantern/0.1".to_string(),
            timeout: Duration::from_millis(10_000),
            max_redirects: 5,
            block_private_hosts: true,
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The original URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// HTTP fetch client with safety checks.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning raw bytes and metadata.
    ///
    /// Canonicalizes the URL, applies the private-host gate, and turns
    /// non-success statuses into errors.
    pub async fn fetch(&self, url_str: &str) -> Result<FetchResponse, FetchError> {
        let start = Instant::now();
        let url = canonicalize(url_str)?;

        if self.config.block_private_hosts {
            ssrf::check_host(&url)?;
        }

        let request = self.http.get(url.as_str()).header(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        );

        let response = request.send().await.map_err(|e| classify_send_error(&url, e))?;

        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), url: url.to_string() });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| classify_send_error(&url, e))?;

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            url,
            final_url,
            fetch_ms,
            bytes.len()
        );

        Ok(FetchResponse { url, final_url, status, content_type, bytes, fetch_ms })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

fn classify_send_error(url: &Url, err: reqwest::Error) -> FetchError {
    if err.is_timeout() { FetchError::Timeout(url.to_string()) } else { FetchError::Network(err) }
}
