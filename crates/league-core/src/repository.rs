//! [`Repository`] — the typed, per-kind view over a [`DocumentStore`].

use std::{future::Future, marker::PhantomData};

use uuid::Uuid;

use crate::{
  Error, Result,
  cancel::CancelSignal,
  document::Document,
  entity::{Entity, PartitionKey},
  store::DocumentStore,
};

/// Create and point-read documents of kind `E`.
///
/// Every store call races the repository's [`CancelSignal`]; a cancelled
/// call resolves to [`Error::Cancelled`] and the in-flight future is dropped.
pub struct Repository<'s, S, E> {
  store:  &'s S,
  cancel: CancelSignal,
  entity: PhantomData<fn() -> E>,
}

impl<S, E> Clone for Repository<'_, S, E> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store,
      cancel: self.cancel.clone(),
      entity: PhantomData,
    }
  }
}

impl<'s, S, E> Repository<'s, S, E>
where
  S: DocumentStore,
  E: Entity,
{
  pub fn new(store: &'s S, cancel: CancelSignal) -> Self {
    Self { store, cancel, entity: PhantomData }
  }

  /// Validate and persist a new document.
  ///
  /// Fails with a precondition error before touching the store if `entity`
  /// is malformed, and with [`Error::Conflict`] if its (id, partition key)
  /// is taken.
  pub async fn create(&self, entity: &E) -> Result<()> {
    entity.validate()?;
    let envelope = entity.clone().into_document().into_envelope()?;
    self.guard(self.store.create(envelope)).await
  }

  /// Point read. A document stored under the key but of another kind reads
  /// as absent.
  pub async fn find(
    &self,
    id: Uuid,
    partition_key: &PartitionKey,
  ) -> Result<Option<E>> {
    let envelope = self.guard(self.store.get(id, partition_key.clone())).await?;
    match envelope {
      Some(envelope) => Ok(E::from_document(Document::from_envelope(envelope)?)),
      None => Ok(None),
    }
  }

  /// Point read that treats absence as [`Error::NotFound`].
  pub async fn get(&self, id: Uuid, partition_key: &PartitionKey) -> Result<E> {
    self
      .find(id, partition_key)
      .await?
      .ok_or_else(|| Error::NotFound {
        id,
        partition_key: partition_key.clone(),
      })
  }

  async fn guard<T, F>(&self, op: F) -> Result<T>
  where
    F: Future<Output = Result<T, S::Error>>,
  {
    if self.cancel.is_cancelled() {
      return Err(Error::Cancelled);
    }
    tokio::select! {
      biased;
      () = self.cancel.cancelled() => Err(Error::Cancelled),
      res = op => res.map_err(Into::into),
    }
  }
}
