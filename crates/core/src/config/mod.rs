//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LANTERN_*)
//! 2. TOML config file (if LANTERN_CONFIG_FILE set)
//! 3. Built-in defaults

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::chat::{GenerationSettings, default_modes};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LANTERN_*)
/// 2. TOML config file (if LANTERN_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite search cache database.
    ///
    /// Set via LANTERN_CACHE_DB_PATH environment variable.
    #[serde(default = "default_cache_db_path")]
    pub cache_db_path: PathBuf,

    /// Path to the SQLite knowledge base database.
    ///
    /// Set via LANTERN_KNOWLEDGE_DB_PATH environment variable.
    #[serde(default = "default_knowledge_db_path")]
    pub knowledge_db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via LANTERN_USER_AGENT environment variable. Defaults to a
    /// desktop browser string; the results endpoint serves a degraded
    /// page to unknown agents.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via LANTERN_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// How long a cached search entry stays fresh, in seconds.
    ///
    /// Set via LANTERN_CACHE_MAX_AGE_SECS environment variable.
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: i64,

    /// Maximum number of results returned per search.
    ///
    /// Set via LANTERN_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Character cap for extracted page text.
    ///
    /// Set via LANTERN_MAX_PAGE_CHARS environment variable.
    #[serde(default = "default_max_page_chars")]
    pub max_page_chars: usize,

    /// Search results endpoint. The query is appended as the `q` parameter.
    ///
    /// Set via LANTERN_SEARCH_ENDPOINT environment variable.
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Named generation modes for chat.
    ///
    /// Override via TOML `[modes.<name>]` tables or
    /// LANTERN_MODES__<NAME>__<FIELD> environment variables.
    #[serde(default = "default_modes")]
    pub modes: BTreeMap<String, GenerationSettings>,
}

fn default_cache_db_path() -> PathBuf {
    PathBuf::from("./lantern-cache.sqlite")
}

fn default_knowledge_db_path() -> PathBuf {
    PathBuf::from("./lantern-knowledge.sqlite")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_cache_max_age_secs() -> i64 {
    3600
}

fn default_max_results() -> usize {
    5
}

fn default_max_page_chars() -> usize {
    3000
}

fn default_search_endpoint() -> String {
    "https://html.duckduckgo.com/html/".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_db_path: default_cache_db_path(),
            knowledge_db_path: default_knowledge_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            cache_max_age_secs: default_cache_max_age_secs(),
            max_results: default_max_results(),
            max_page_chars: default_max_page_chars(),
            search_endpoint: default_search_endpoint(),
            modes: default_modes(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LANTERN_`
    /// 2. TOML file from `LANTERN_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LANTERN_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LANTERN_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
