//! Knowledge entry operations.
//!
//! Entries are free-form notes with optional tags, stored newest-first.
//! Tags are persisted as a JSON array in a text column; rows written by
//! older builds may hold NULL or junk there, which decodes to no tags.

use super::connection::KnowledgeDb;
use crate::Error;
use crate::db;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A stored knowledge entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct KnowledgeEntry {
    /// Row id assigned on insert.
    pub id: i64,
    /// Short display title.
    pub title: String,
    /// Entry body text.
    pub content: String,
    /// Optional labels attached to the entry.
    pub tags: Vec<String>,
    /// Insertion time as RFC 3339.
    pub created_at: String,
}

fn decode_tags(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok()).unwrap_or_default()
}

impl KnowledgeDb {
    /// Insert a new entry and return its id.
    pub async fn add_entry(&self, title: &str, content: &str, tags: &[String]) -> Result<i64, Error> {
        let title = title.to_string();
        let content = content.to_string();
        let tags_json = serde_json::to_string(tags).map_err(|e| Error::InvalidInput(e.to_string()))?;
        let created_at = db::now_timestamp();

        self.conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT INTO knowledge (title, content, tags, created_at) VALUES (?1, ?2, ?3, ?4)",
                    params![title, content, tags_json, created_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    /// List all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<KnowledgeEntry>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<KnowledgeEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, title, content, tags, created_at FROM knowledge
                    ORDER BY created_at DESC, id DESC",
                )?;

                let entries = stmt
                    .query_map([], |row| {
                        let tags: Option<String> = row.get(3)?;
                        Ok(KnowledgeEntry {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            content: row.get(2)?,
                            tags: decode_tags(tags.as_deref()),
                            created_at: row.get(4)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(entries)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete an entry by id. Returns true if a row was removed.
    pub async fn delete_entry(&self, id: i64) -> Result<bool, Error> {
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM knowledge WHERE id = ?1", params![id])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_list_entry() {
        let db = KnowledgeDb::open_in_memory().await.unwrap();
        let tags = vec!["rust".to_string(), "async".to_string()];

        let id = db.add_entry("Pinning", "Pin prevents moves of self-referential futures.", &tags).await.unwrap();
        assert!(id > 0);

        let entries = db.list_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].title, "Pinning");
        assert_eq!(entries[0].tags, tags);
        assert!(!entries[0].created_at.is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = KnowledgeDb::open_in_memory().await.unwrap();
        db.add_entry("first", "a", &[]).await.unwrap();
        db.add_entry("second", "b", &[]).await.unwrap();
        db.add_entry("third", "c", &[]).await.unwrap();

        let entries = db.list_entries().await.unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let db = KnowledgeDb::open_in_memory().await.unwrap();
        let id = db.add_entry("temp", "delete me", &[]).await.unwrap();

        assert!(db.delete_entry(id).await.unwrap());
        assert!(!db.delete_entry(id).await.unwrap());
        assert!(db.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tags_preserve_order() {
        let db = KnowledgeDb::open_in_memory().await.unwrap();
        let tags = vec!["z".to_string(), "a".to_string(), "m".to_string()];
        db.add_entry("ordered", "x", &tags).await.unwrap();

        let entries = db.list_entries().await.unwrap();
        assert_eq!(entries[0].tags, tags);
    }

    #[test]
    fn test_decode_tags_tolerates_junk() {
        assert_eq!(decode_tags(Some(r#"["a","b"]"#)), vec!["a".to_string(), "b".to_string()]);
        assert!(decode_tags(Some("not json")).is_empty());
        assert!(decode_tags(None).is_empty());
    }
}
