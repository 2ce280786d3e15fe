//! Client code for lantern.
//!
//! This crate provides the HTTP fetch pipeline, search results extraction,
//! page text cleanup, and the search orchestration used by the server.

pub mod fetch;
pub mod search;
pub mod serp;
pub mod text;

pub use fetch::{FetchClient, FetchConfig, FetchError, FetchResponse, canonicalize};
pub use search::{SearchConfig, SearchService};
pub use serp::extract_hits;
pub use text::visible_text;
