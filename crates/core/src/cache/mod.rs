//! SQLite-backed cache for search results.
//!
//! This module provides a persistent query cache using SQLite with async
//! access via tokio-rusqlite. It supports:
//!
//! - Deterministic keys from normalized queries via SHA-256
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Read-time freshness with age-based and full purges

pub mod connection;
pub mod hash;
pub mod results;

pub use crate::Error;

pub use connection::CacheDb;
pub use results::Hit;
