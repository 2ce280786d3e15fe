//! Deterministic cache key generation for search queries.

use sha2::{Digest, Sha256};

/// Compute the cache key for a search query.
///
/// The query is normalized first, so queries that differ only in case or
/// whitespace map to the same key. The key is a hex-encoded SHA-256 digest,
/// stable across processes and restarts.
pub fn query_cache_key(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_query(query).as_bytes());
    hex::encode(hasher.finalize())
}

/// Normalize a query for keying: collapse whitespace runs to single
/// spaces, trim the ends, and lowercase.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
