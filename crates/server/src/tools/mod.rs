//! MCP tool implementations.
//!
//! This module contains all tools exposed by the lantern server.

pub mod cache_purge;
pub mod chat;
pub mod fetch_page;
pub mod knowledge;
pub mod web_search;
