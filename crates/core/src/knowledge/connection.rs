//! Knowledge base database handle.
//!
//! Opens the SQLite database through the shared plumbing in [`crate::db`]
//! and runs the knowledge schema migrations.

use crate::Error;
use crate::db;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Migration list: (version, SQL).
const MIGRATIONS: &[(&str, &str)] = &[("1", include_str!("../../migrations/001_knowledge.sql"))];

/// Knowledge base database handle.
///
/// Wraps a tokio-rusqlite Connection that runs database operations
/// on a background thread. Cloning is cheap and shares the connection.
#[derive(Clone, Debug)]
pub struct KnowledgeDb {
    pub(crate) conn: Connection,
}

impl KnowledgeDb {
    /// Open the knowledge database at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies performance pragmas,
    /// and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = db::open(path).await?;
        db::run_migrations(&conn, MIGRATIONS).await?;
        Ok(Self { conn })
    }

    /// Open an in-memory knowledge database for testing.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = db::open_in_memory().await?;
        db::run_migrations(&conn, MIGRATIONS).await?;
        Ok(Self { conn })
    }
}
