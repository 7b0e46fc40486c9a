//! SQLite backend for the league document store.
//!
//! One `documents` table plays the shared container; the configured container
//! name is part of every key, so several logical containers can share a file.
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
