//! SQLite-backed knowledge base.
//!
//! A small persistent store for user-curated notes, kept in its own
//! database file so it survives cache purges. Uses the same connection
//! and migration plumbing as the search cache.

pub mod connection;
pub mod entries;

pub use connection::KnowledgeDb;
pub use entries::KnowledgeEntry;
