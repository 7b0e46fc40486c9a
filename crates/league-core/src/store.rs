//! The `DocumentStore` trait — the only path to storage.
//!
//! The trait is implemented by storage backends (e.g. `league-store-sqlite`).
//! It covers a point write and a point read, both addressed by (id, partition
//! key). There are no updates, deletes or scans.

use std::future::Future;

use uuid::Uuid;

use crate::{document::Envelope, entity::PartitionKey};

/// Abstraction over one container of a document database.
///
/// Implementations must honour two guarantees the rest of the workspace is
/// built on:
///
/// - `create` rejects a second document with the same (id, partition key)
///   with an error converting to [`crate::Error::Conflict`];
/// - `get` issued after a successful `create` by the same caller observes
///   that document (read-your-writes).
///
/// Errors convert into [`crate::Error`] so callers can classify them by
/// [`crate::ErrorKind`]; transport failures must map to `Unavailable`.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Persist a new document.
  fn create(
    &self,
    envelope: Envelope,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Point read. Returns `None` if nothing is stored under the key.
  fn get(
    &self,
    id: Uuid,
    partition_key: PartitionKey,
  ) -> impl Future<Output = Result<Option<Envelope>, Self::Error>> + Send + '_;
}
