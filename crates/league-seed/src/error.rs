//! Error type for `league-seed`.

use std::fmt;

use league_core::{
  ErrorKind,
  entity::{Entity, EntityKind, PartitionKey},
};
use thiserror::Error;
use uuid::Uuid;

use crate::seeder::Stage;

/// The step of the write-then-read protocol that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
  /// Deriving the id or partition key of an entity.
  Derive,
  Create,
  ReadBack,
  Project,
}

/// The document an operation was aimed at. Either half may be missing when
/// the entity was too malformed to derive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub id:            Option<Uuid>,
  pub partition_key: Option<PartitionKey>,
}

impl Target {
  pub fn of<E: Entity>(entity: &E) -> Self {
    Self {
      id:            entity.record().id,
      partition_key: entity.partition_key().ok(),
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.id {
      Some(id) => write!(f, "id {id}")?,
      None => f.write_str("no id")?,
    }
    match &self.partition_key {
      Some(pk) => write!(f, ", partition {pk}"),
      None => f.write_str(", no partition"),
    }
  }
}

/// Why a seeding run was aborted. Every run either completes every stage or
/// fails with exactly one of these.
#[derive(Debug, Error)]
pub enum SeedError {
  #[error("invalid seed plan: {0}")]
  Plan(String),

  #[error("{stage}: {operation} of {kind} ({target}) failed: {source}")]
  Entity {
    stage:     Stage,
    operation: Operation,
    kind:      EntityKind,
    target:    Target,
    #[source]
    source:    league_core::Error,
  },
}

impl SeedError {
  pub fn entity<E: Entity>(
    stage: Stage,
    operation: Operation,
    entity: &E,
    source: league_core::Error,
  ) -> Self {
    Self::Entity {
      stage,
      operation,
      kind: E::KIND,
      target: Target::of(entity),
      source,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Plan(_) => ErrorKind::Precondition,
      Self::Entity { source, .. } => source.kind(),
    }
  }

  /// The stage being entered when the run failed; `None` for plan errors,
  /// which are caught before the first stage.
  pub fn stage(&self) -> Option<Stage> {
    match self {
      Self::Plan(_) => None,
      Self::Entity { stage, .. } => Some(*stage),
    }
  }
}
