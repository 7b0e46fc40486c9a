//! Encoding and decoding helpers between envelopes and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings,
//! discriminator lists and bodies compact JSON.

use chrono::{DateTime, Utc};
use league_core::{document::Envelope, entity::PartitionKey};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Item type ───────────────────────────────────────────────────────────────

pub fn encode_item_type(labels: &[String]) -> Result<String> {
  Ok(serde_json::to_string(labels)?)
}

pub fn decode_item_type(s: &str) -> Result<Vec<String>> {
  let labels: Vec<String> = serde_json::from_str(s)?;
  if labels.is_empty() {
    return Err(Error::Corrupt("empty item type".into()));
  }
  Ok(labels)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values for a `documents` insert.
pub struct NewRow {
  pub container:     String,
  pub partition_key: String,
  pub id:            String,
  pub item_type:     String,
  pub is_active:     bool,
  pub body:          String,
  pub written_at:    String,
}

impl NewRow {
  pub fn from_envelope(container: &str, envelope: &Envelope) -> Result<Self> {
    Ok(Self {
      container:     container.to_owned(),
      partition_key: envelope.partition_key.to_string(),
      id:            encode_uuid(envelope.id),
      item_type:     encode_item_type(&envelope.item_type)?,
      is_active:     envelope.is_active,
      body:          envelope.body.to_string(),
      written_at:    encode_dt(Utc::now()),
    })
  }
}

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub id:        String,
  pub item_type: String,
  pub is_active: bool,
  pub body:      String,
}

impl RawDocument {
  /// The partition key is the one the row was looked up by; it is never
  /// parsed back out of storage.
  pub fn into_envelope(self, partition_key: PartitionKey) -> Result<Envelope> {
    Ok(Envelope {
      id: decode_uuid(&self.id)?,
      partition_key,
      item_type: decode_item_type(&self.item_type)?,
      is_active: self.is_active,
      body: serde_json::from_str(&self.body)?,
    })
  }
}
