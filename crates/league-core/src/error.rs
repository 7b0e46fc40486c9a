//! Error types for `league-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::{EntityKind, PartitionKey};

/// Coarse classification of a failure.
///
/// Nothing in this workspace retries automatically; the kind tells a caller
/// whether retrying could help (`Unavailable`) or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  /// The entity was malformed before it reached storage.
  Precondition,
  /// A document with the same (id, partition key) already exists.
  Conflict,
  /// A point read found nothing.
  NotFound,
  /// Transport-level failure; retryable by the caller.
  Unavailable,
  /// The operation was aborted through a cancel signal.
  Cancelled,
  /// Stored data could not be decoded, or the backend failed in a way that
  /// retrying will not fix.
  Internal,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} has no identifier")]
  MissingId { kind: EntityKind },

  #[error("{kind} has no tenant scope to derive a partition key from")]
  MissingScope { kind: EntityKind },

  #[error(
    "{kind} {id}: modified-at {modified_at} precedes created-at {created_at}"
  )]
  AuditOrder {
    kind:        EntityKind,
    id:          Uuid,
    created_at:  DateTime<Utc>,
    modified_at: DateTime<Utc>,
  },

  #[error(
    "{kind} {id} in account {account_id} references team {team_id} of account \
     {team_account_id}"
  )]
  CrossTenant {
    kind:            EntityKind,
    id:              Uuid,
    account_id:      Uuid,
    team_id:         Uuid,
    team_account_id: Uuid,
  },

  #[error("team assignment for team {team_id} embeds overview of team {overview_id}")]
  AssignmentMismatch { team_id: Uuid, overview_id: Uuid },

  #[error("unknown item type: {0:?}")]
  UnknownItemType(Vec<String>),

  #[error("document {id} already exists in partition {partition_key}")]
  Conflict { id: Uuid, partition_key: PartitionKey },

  #[error("document {id} not found in partition {partition_key}")]
  NotFound { id: Uuid, partition_key: PartitionKey },

  #[error("store unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("operation cancelled")]
  Cancelled,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::MissingId { .. }
      | Self::MissingScope { .. }
      | Self::AuditOrder { .. }
      | Self::CrossTenant { .. }
      | Self::AssignmentMismatch { .. } => ErrorKind::Precondition,
      Self::Conflict { .. } => ErrorKind::Conflict,
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::Unavailable(_) => ErrorKind::Unavailable,
      Self::Cancelled => ErrorKind::Cancelled,
      Self::UnknownItemType(_) | Self::Serialization(_) | Self::Store(_) => {
        ErrorKind::Internal
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
