//! Core types and shared functionality for lantern.
//!
//! This crate provides:
//! - Search cache and knowledge base with SQLite backends
//! - Chat prompt assembly with pluggable model backends
//! - Layered configuration
//! - Unified error types

pub mod cache;
pub mod chat;
pub mod config;
mod db;
pub mod error;
pub mod knowledge;

pub use cache::{CacheDb, Hit};
pub use chat::{ChatModel, ChatProcessor, GenerationSettings, ModelError};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use knowledge::{KnowledgeDb, KnowledgeEntry};
