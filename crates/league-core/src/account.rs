//! Account — the tenant root. Its own id is its partition key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  document::Document,
  entity::{AuditMetadata, Entity, EntityKind, Record},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
  #[serde(flatten)]
  pub record:       Record,
  pub display_name: String,
  /// Normalized form of `display_name`; see [`Account::slugify`].
  pub name:         String,
}

impl Account {
  pub fn new(display_name: impl Into<String>, audit: AuditMetadata) -> Self {
    let display_name = display_name.into();
    Self {
      record: Record::new(audit),
      name: Self::slugify(&display_name),
      display_name,
    }
  }

  /// Lowercase, with spaces replaced by `-`. Accents are kept.
  pub fn slugify(display_name: &str) -> String {
    display_name.to_lowercase().replace(' ', "-")
  }
}

impl Entity for Account {
  const KIND: EntityKind = EntityKind::Account;

  fn record(&self) -> &Record { &self.record }

  fn record_mut(&mut self) -> &mut Record { &mut self.record }

  fn scope(&self) -> Option<Uuid> { self.record.id }

  fn into_document(self) -> Document { Document::Account(self) }

  fn from_document(document: Document) -> Option<Self> {
    match document {
      Document::Account(account) => Some(account),
      _ => None,
    }
  }
}
