//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `cache_max_age_secs` is 0 or negative
    /// - `max_results` is 0 or exceeds 25
    /// - `max_page_chars` is 0
    /// - `search_endpoint` is not an http(s) URL
    /// - `modes` has no `normal` entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cache_max_age_secs <= 0 {
            return Err(ConfigError::Invalid {
                field: "cache_max_age_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.max_results == 0 {
            return Err(ConfigError::Invalid { field: "max_results".into(), reason: "must be greater than 0".into() });
        }
        if self.max_results > 25 {
            return Err(ConfigError::Invalid { field: "max_results".into(), reason: "must not exceed 25".into() });
        }

        if self.max_page_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "max_page_chars".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if !self.search_endpoint.starts_with("http://") && !self.search_endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "search_endpoint".into(),
                reason: "must be an http:// or https:// URL".into(),
            });
        }

        if !self.modes.contains_key("normal") {
            return Err(ConfigError::Invalid {
                field: "modes".into(),
                reason: "must define a `normal` mode".into(),
            });
        }

        if self.max_results > 10 {
            tracing::warn!(
                max_results = self.max_results,
                "max_results exceeds what a single results page usually carries"
            );
        }

        Ok(())
    }
}
