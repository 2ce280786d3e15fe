//! Search result cache operations.
//!
//! Stores decoded result lists keyed by normalized query hash. Freshness
//! is decided at read time: a row older than the caller's max age is
//! treated as a miss but left in place until a purge removes it.

use super::connection::CacheDb;
use super::hash::query_cache_key;
use crate::Error;
use crate::db;
use chrono::{Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Hit {
    /// Result title text.
    pub title: String,
    /// Short summary shown under the title.
    pub snippet: String,
    /// Target URL as it appeared in the results page.
    pub url: String,
}

/// Oldest fetched_at timestamp still considered fresh.
fn cutoff_timestamp(max_age_secs: i64) -> String {
    (Utc::now() - Duration::seconds(max_age_secs)).to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl CacheDb {
    /// Get cached results for a query if a fresh entry exists.
    ///
    /// Returns None when there is no entry, the entry is older than
    /// `max_age_secs`, or the stored payload no longer decodes. An
    /// undecodable payload is logged and treated as a miss rather than
    /// failing the lookup.
    pub async fn get_results(&self, query: &str, max_age_secs: i64) -> Result<Option<Vec<Hit>>, Error> {
        let key_hash = query_cache_key(query);
        let cutoff = cutoff_timestamp(max_age_secs);
        let raw = self
            .conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt =
                    conn.prepare("SELECT hits_json FROM search_cache WHERE key_hash = ?1 AND fetched_at > ?2")?;

                let result = stmt.query_row(params![key_hash, cutoff], |row| row.get(0));

                match result {
                    Ok(json) => Ok(Some(json)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        let Some(json) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(hits) => Ok(Some(hits)),
            Err(e) => {
                tracing::warn!("discarding undecodable cache entry: {}", e);
                Ok(None)
            }
        }
    }

    /// Insert or update cached results for a query.
    ///
    /// Uses UPSERT semantics: inserts if the key doesn't exist, replaces
    /// the payload and timestamp if it does.
    pub async fn put_results(&self, query: &str, hits: &[Hit]) -> Result<(), Error> {
        let key_hash = query_cache_key(query);
        let query = query.to_string();
        let hits_json = serde_json::to_string(hits).map_err(|e| Error::InvalidInput(e.to_string()))?;
        let fetched_at = db::now_timestamp();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO search_cache (key_hash, query, hits_json, fetched_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(key_hash) DO UPDATE SET
                        query = excluded.query,
                        hits_json = excluded.hits_json,
                        fetched_at = excluded.fetched_at",
                    params![key_hash, query, hits_json, fetched_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Check whether any entry exists for a query, fresh or expired.
    pub async fn has_entry(&self, query: &str) -> Result<bool, Error> {
        let key_hash = query_cache_key(query);
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let exists: bool = conn
                    .query_row(
                        "SELECT EXISTS(SELECT 1 FROM search_cache WHERE key_hash = ?1)",
                        params![key_hash],
                        |row| row.get(0),
                    )
                    .map_err(Error::from)?;

                Ok(exists)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete entries older than `max_age_secs`.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_expired(&self, max_age_secs: i64) -> Result<u64, Error> {
        let cutoff = cutoff_timestamp(max_age_secs);
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM search_cache WHERE fetched_at <= ?1", params![cutoff])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every cache entry regardless of age.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_all(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM search_cache", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
