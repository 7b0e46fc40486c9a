//! Shared storage contracts: every document is *storable* (id, derived
//! partition key, discriminator list, active flag) and *auditable* (who and
//! when, for creation and last modification).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use crate::{Error, Result, document::Document, team::TeamOverview};

// ─── Entity kinds ────────────────────────────────────────────────────────────

/// The five document kinds sharing the container.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
)]
pub enum EntityKind {
  Account,
  Team,
  Player,
  Coach,
  Game,
}

impl EntityKind {
  /// The discriminator labels stored on every document of this kind,
  /// ancestors first and the most specific label last.
  pub const fn item_type(self) -> &'static [&'static str] {
    match self {
      Self::Account => &["Account"],
      Self::Team => &["Team"],
      Self::Player => &["User", "Player"],
      Self::Coach => &["User", "Coach"],
      Self::Game => &["Game"],
    }
  }

  /// Resolve a stored discriminator list back to its kind. Only an exact
  /// match of the full chain is accepted.
  pub fn from_item_type<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
    Self::iter().find(|kind| {
      labels
        .iter()
        .map(AsRef::as_ref)
        .eq(kind.item_type().iter().copied())
    })
  }

  /// Whether documents of this kind answer to a query on `label` at any level
  /// of the hierarchy.
  pub fn has_label(self, label: &str) -> bool {
    self.item_type().contains(&label)
  }
}

// ─── Partition key ───────────────────────────────────────────────────────────

/// The value the container co-locates documents by: always a tenant
/// (account) id rendered as a hyphenated string.
///
/// There is no way to build one from an arbitrary string; it can only be
/// derived from an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<Uuid> for PartitionKey {
  fn from(id: Uuid) -> Self { Self(id.hyphenated().to_string()) }
}

impl fmt::Display for PartitionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Audit metadata ──────────────────────────────────────────────────────────

/// Who created and last modified a document, and when.
///
/// Invariant: `created_at <= modified_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
  #[serde(rename = "createdDateTime")]
  pub created_at:  DateTime<Utc>,
  #[serde(rename = "modifiedDateTime")]
  pub modified_at: DateTime<Utc>,
  pub created_by:  Option<String>,
  pub modified_by: Option<String>,
}

impl AuditMetadata {
  /// Both timestamps set to `at`, both actors set to `actor`.
  pub fn new(actor: impl Into<String>, at: DateTime<Utc>) -> Self {
    let actor = actor.into();
    Self {
      created_at:  at,
      modified_at: at,
      created_by:  Some(actor.clone()),
      modified_by: Some(actor),
    }
  }

  /// Record a modification. `modified_at` never moves before `created_at`.
  pub fn touch(&mut self, actor: impl Into<String>, at: DateTime<Utc>) {
    self.modified_by = Some(actor.into());
    self.modified_at = at.max(self.created_at);
  }

  pub fn is_ordered(&self) -> bool { self.created_at <= self.modified_at }
}

impl Default for AuditMetadata {
  fn default() -> Self {
    let now = Utc::now();
    Self {
      created_at:  now,
      modified_at: now,
      created_by:  None,
      modified_by: None,
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// The fields every stored document carries, flattened into each entity's
/// JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
  pub id:             Option<Uuid>,
  pub is_active:      bool,
  pub audit_metadata: AuditMetadata,
}

impl Record {
  /// A fresh, active record with a newly generated id.
  pub fn new(audit_metadata: AuditMetadata) -> Self {
    Self {
      id: Some(Uuid::new_v4()),
      is_active: true,
      audit_metadata,
    }
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A document kind that can live in the shared container.
pub trait Entity:
  Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  const KIND: EntityKind;

  fn record(&self) -> &Record;

  fn record_mut(&mut self) -> &mut Record;

  /// The tenant-scoping id the partition key is derived from: the owning
  /// account, or the entity's own id for an account.
  fn scope(&self) -> Option<Uuid>;

  /// Every team snapshot embedded in this document.
  fn team_references(&self) -> Vec<&TeamOverview> { Vec::new() }

  /// Kind-specific structural checks beyond the shared ones.
  fn validate_embedded(&self) -> Result<()> { Ok(()) }

  fn into_document(self) -> Document;

  /// `None` if `document` is of a different kind.
  fn from_document(document: Document) -> Option<Self>;

  fn id(&self) -> Result<Uuid> {
    self.record().id.ok_or(Error::MissingId { kind: Self::KIND })
  }

  /// Derived on every call, so it can never drift from the scoping field.
  /// Fails if that field is unset (absent or nil).
  fn partition_key(&self) -> Result<PartitionKey> {
    self
      .scope()
      .filter(|id| !id.is_nil())
      .map(PartitionKey::from)
      .ok_or(Error::MissingScope { kind: Self::KIND })
  }

  fn item_type(&self) -> &'static [&'static str] { Self::KIND.item_type() }

  fn is_active(&self) -> bool { self.record().is_active }

  /// Everything that must hold before a document may be persisted.
  fn validate(&self) -> Result<()> {
    let id = self.id()?;
    let account_id = self
      .scope()
      .filter(|id| !id.is_nil())
      .ok_or(Error::MissingScope { kind: Self::KIND })?;

    let audit = &self.record().audit_metadata;
    if !audit.is_ordered() {
      return Err(Error::AuditOrder {
        kind: Self::KIND,
        id,
        created_at: audit.created_at,
        modified_at: audit.modified_at,
      });
    }

    for team in self.team_references() {
      if team.account_id() != account_id {
        return Err(Error::CrossTenant {
          kind: Self::KIND,
          id,
          account_id,
          team_id: team.id(),
          team_account_id: team.account_id(),
        });
      }
    }

    self.validate_embedded()
  }
}
