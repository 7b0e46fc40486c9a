//! Seeds one demo tenant into the league document store.
//!
//! The [`Seeder`] builds account → teams → overviews → players → coaches →
//! games in dependency order against any [`league_core::store::DocumentStore`],
//! verifying every write with a read-back. It doubles as the end-to-end
//! exercise of the data model's invariants.

pub mod config;
pub mod error;
pub mod plan;
pub mod seeder;

pub use config::SeedConfig;
pub use error::SeedError;
pub use plan::SeedPlan;
pub use seeder::{SeedOptions, SeedReport, SeedState, Seeder, Stage};
