//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use league_core::{
  document::Envelope,
  entity::PartitionKey,
  store::DocumentStore,
};
use rusqlite::{ErrorCode, OptionalExtension as _};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{NewRow, RawDocument, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// One container of the league document store, backed by a SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:      tokio_rusqlite::Connection,
  container: String,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, container: &str) -> Result<Self> {
    let container = validate_container(container)?;
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, container };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(container: &str) -> Result<Self> {
    let container = validate_container(container)?;
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, container };
    store.init_schema().await?;
    Ok(store)
  }

  pub fn container(&self) -> &str { &self.container }

  /// A handle on another container in the same database.
  pub fn with_container(&self, container: &str) -> Result<Self> {
    Ok(Self {
      conn:      self.conn.clone(),
      container: validate_container(container)?,
    })
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Check the container is reachable and return how many documents it
  /// currently holds.
  pub async fn verify_container(&self) -> Result<u64> {
    let container = self.container.clone();
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents WHERE container = ?1",
          rusqlite::params![container],
          |row| row.get(0),
        )?)
      })
      .await?;
    u64::try_from(count).map_err(|_| Error::Corrupt(format!("count {count}")))
  }

  /// Count the documents in one partition whose discriminator list contains
  /// `label` at any level.
  pub async fn count_labelled(
    &self,
    partition_key: &PartitionKey,
    label: &str,
  ) -> Result<u64> {
    let container = self.container.clone();
    let pk = partition_key.to_string();
    let label = label.to_owned();
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents, json_each(documents.item_type) AS t
           WHERE container = ?1 AND partition_key = ?2 AND t.value = ?3",
          rusqlite::params![container, pk, label],
          |row| row.get(0),
        )?)
      })
      .await?;
    u64::try_from(count).map_err(|_| Error::Corrupt(format!("count {count}")))
  }
}

/// Container names are opaque keys, but an empty or padded one is almost
/// certainly a configuration mistake.
fn validate_container(container: &str) -> Result<String> {
  if container.is_empty() || container.trim() != container {
    return Err(Error::InvalidContainer(container.to_owned()));
  }
  Ok(container.to_owned())
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  async fn create(&self, envelope: Envelope) -> Result<()> {
    let row = NewRow::from_envelope(&self.container, &envelope)?;

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO documents (
             container, partition_key, id, item_type, is_active, body, written_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.container,
            row.partition_key,
            row.id,
            row.item_type,
            row.is_active,
            row.body,
            row.written_at,
          ],
        );
        match res {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == ErrorCode::ConstraintViolation =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(Error::Conflict {
        id:            envelope.id,
        partition_key: envelope.partition_key,
      });
    }
    Ok(())
  }

  async fn get(
    &self,
    id: Uuid,
    partition_key: PartitionKey,
  ) -> Result<Option<Envelope>> {
    let container = self.container.clone();
    let pk_str = partition_key.to_string();
    let id_str = encode_uuid(id);

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, item_type, is_active, body FROM documents
               WHERE container = ?1 AND partition_key = ?2 AND id = ?3",
              rusqlite::params![container, pk_str, id_str],
              |row| {
                Ok(RawDocument {
                  id:        row.get(0)?,
                  item_type: row.get(1)?,
                  is_active: row.get(2)?,
                  body:      row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(|raw| raw.into_envelope(partition_key)).transpose()
  }
}
