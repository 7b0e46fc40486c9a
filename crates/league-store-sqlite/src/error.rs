//! Error type for `league-store-sqlite`.

use league_core::entity::PartitionKey;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] league_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored row that cannot be decoded back into an envelope.
  #[error("corrupt row: {0}")]
  Corrupt(String),

  #[error("document {id} already exists in partition {partition_key}")]
  Conflict {
    id:            uuid::Uuid,
    partition_key: PartitionKey,
  },

  #[error("invalid container name: {0:?}")]
  InvalidContainer(String),
}

impl Error {
  /// Whether retrying the same operation later could succeed.
  pub fn is_transient(&self) -> bool {
    match self {
      Self::Database(tokio_rusqlite::Error::ConnectionClosed) => true,
      Self::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(failure, _),
      )) => matches!(
        failure.code,
        ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
      ),
      _ => false,
    }
  }
}

impl From<Error> for league_core::Error {
  fn from(err: Error) -> Self {
    if err.is_transient() {
      return Self::Unavailable(Box::new(err));
    }
    match err {
      Error::Core(e) => e,
      Error::Json(e) => Self::Serialization(e),
      Error::Conflict { id, partition_key } => {
        Self::Conflict { id, partition_key }
      }
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
