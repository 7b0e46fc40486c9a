//! Core types and trait definitions for the league document store.
//!
//! Every entity kind lives in one shared container, partitioned by tenant
//! (account). This crate holds the document schema, the overview projection,
//! the storage contract and the typed repository built on it. It has no
//! database dependency; backends such as `league-store-sqlite` implement
//! [`store::DocumentStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod cancel;
pub mod document;
pub mod entity;
pub mod error;
pub mod game;
pub mod repository;
pub mod store;
pub mod team;
pub mod user;

pub use error::{Error, ErrorKind, Result};
