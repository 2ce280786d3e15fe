//! Shared SQLite plumbing for the cache and knowledge databases.
//!
//! Both stores open their connection the same way: apply performance
//! pragmas (WAL mode), then run the store's migration list against a
//! version table.

use std::num::ParseIntError;
use std::path::Path;

use crate::Error;
use chrono::{SecondsFormat, Utc};
use tokio_rusqlite::{Connection, params};

/// Open a database at the specified path with pragmas applied.
///
/// Creates the parent directory and the file if they don't exist.
pub(crate) async fn open(path: impl AsRef<Path>) -> Result<Connection, Error> {
    if let Some(parent) = path.as_ref().parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::Io(e.to_string()))?;
    }

    let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
    apply_pragmas(&conn).await?;
    Ok(conn)
}

/// Open an in-memory database for testing.
pub(crate) async fn open_in_memory() -> Result<Connection, Error> {
    let conn = Connection::open_in_memory()
        .await
        .map_err(|e| Error::Database(e.into()))?;
    apply_pragmas(&conn).await?;
    Ok(conn)
}

async fn apply_pragmas(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA temp_store=MEMORY;
             PRAGMA foreign_keys=ON;",
        )?;
        Ok(())
    })
    .await
    .map_err(Error::Database)
}

/// Run any pending migrations from the given list.
///
/// Creates the _migrations table if it doesn't exist, checks the current
/// version, and applies any migrations that haven't been run yet. Entries
/// are (version, SQL) pairs applied in order.
///
/// # Errors
///
/// Returns an error if a migration SQL fails to execute.
pub(crate) async fn run_migrations(
    conn: &Connection,
    migrations: &'static [(&'static str, &'static str)],
) -> Result<(), Error> {
    conn.call(move |conn| -> Result<(), Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(Error::from)?;

        let current: i64 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| {
                row.get(0)
            })
            .map_err(Error::from)?;

        for (version, sql) in migrations {
            let version_num: i64 = version
                .parse()
                .map_err(|e: ParseIntError| Error::MigrationFailed(e.to_string()))?;
            if version_num > current {
                conn.execute_batch(sql)?;
                conn.execute(
                    "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                    params![version_num, now_timestamp()],
                )
                .map_err(Error::from)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}

/// Current UTC time as an RFC 3339 string.
///
/// Fixed microsecond precision with a trailing Z, so stored timestamps are
/// uniform width and string comparison orders them chronologically.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MIGRATIONS: &[(&str, &str)] = &[(
        "1",
        "CREATE TABLE IF NOT EXISTS notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL);",
    )];

    #[tokio::test]
    async fn test_open_in_memory() {
        let conn = open_in_memory().await.unwrap();
        let version = conn
            .call(|conn| conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0)))
            .await
            .unwrap();
        assert!(!version.is_empty());
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let conn = open_in_memory().await.unwrap();
        run_migrations(&conn, TEST_MIGRATIONS).await.unwrap();
        run_migrations(&conn, TEST_MIGRATIONS).await.unwrap();

        let has_notes: bool = conn
            .call(|conn| {
                conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='notes')",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();

        assert!(has_notes);
    }

    #[tokio::test]
    async fn test_migrations_version_tracking() {
        let conn = open_in_memory().await.unwrap();
        run_migrations(&conn, TEST_MIGRATIONS).await.unwrap();

        let count: i64 = conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0)))
            .await
            .unwrap();

        assert_eq!(count, TEST_MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_now_timestamp_fixed_width() {
        let a = now_timestamp();
        let b = now_timestamp();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
    }
}
