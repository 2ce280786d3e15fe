//! Search cache database handle.
//!
//! Opens the SQLite database through the shared plumbing in [`crate::db`]
//! and runs the cache schema migrations.

use crate::Error;
use crate::db;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Migration list: (version, SQL).
///
/// Migrations must be applied in order. All migrations are idempotent
/// using CREATE IF NOT EXISTS.
const MIGRATIONS: &[(&str, &str)] = &[("1", include_str!("../../migrations/001_search_cache.sql"))];

/// Search cache database handle.
///
/// Wraps a tokio-rusqlite Connection that runs database operations
/// on a background thread. Cloning is cheap and shares the connection.
#[derive(Clone, Debug)]
pub struct CacheDb {
    pub(crate) conn: Connection,
}

impl CacheDb {
    /// Open the cache database at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies performance pragmas,
    /// and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = db::open(path).await?;
        db::run_migrations(&conn, MIGRATIONS).await?;
        Ok(Self { conn })
    }

    /// Open an in-memory cache database for testing.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = db::open_in_memory().await?;
        db::run_migrations(&conn, MIGRATIONS).await?;
        Ok(Self { conn })
    }
}
