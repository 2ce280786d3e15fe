//! Knowledge base tools.
//!
//! Add, list, and delete operations over the persistent note store.

pub mod add;
pub mod delete;
pub mod list;
