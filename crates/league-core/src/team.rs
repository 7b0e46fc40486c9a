//! Teams and their embeddable overview snapshot.
//!
//! Games, player assignments and coaches never hold a live reference to a
//! team. They embed a [`TeamOverview`] captured at the moment of embedding,
//! which spares a fan-out read whenever they are displayed. The price is
//! staleness: renaming or deactivating a team later does not touch snapshots
//! already written, and nothing cascades.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  document::Document,
  entity::{AuditMetadata, Entity, EntityKind, Record},
};

// ─── Team ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
  #[serde(flatten)]
  pub record:       Record,
  pub account_id:   Uuid,
  pub name_display: String,
}

impl Team {
  pub fn new(
    account_id: Uuid,
    name_display: impl Into<String>,
    audit: AuditMetadata,
  ) -> Self {
    Self {
      record: Record::new(audit),
      account_id,
      name_display: name_display.into(),
    }
  }
}

impl Entity for Team {
  const KIND: EntityKind = EntityKind::Team;

  fn record(&self) -> &Record { &self.record }

  fn record_mut(&mut self) -> &mut Record { &mut self.record }

  fn scope(&self) -> Option<Uuid> { Some(self.account_id) }

  fn into_document(self) -> Document { Document::Team(self) }

  fn from_document(document: Document) -> Option<Self> {
    match document {
      Document::Team(team) => Some(team),
      _ => None,
    }
  }
}

// ─── TeamOverview ────────────────────────────────────────────────────────────

/// A point-in-time copy of a team's identifying fields.
///
/// The only constructor is [`TeamOverview::project`]; fields are read-only so
/// a snapshot always matches the team it was taken from at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOverview {
  id:           Uuid,
  name_display: String,
  account_id:   Uuid,
  is_active:    bool,
}

impl TeamOverview {
  /// Project `team` into a snapshot. Pure: no lookups, a strict subset copy.
  ///
  /// Call it right after the team was persisted and read back, so the
  /// snapshot is as fresh as possible when it gets embedded.
  pub fn project(team: &Team) -> Result<Self> {
    let id = team.id()?;
    if team.account_id.is_nil() {
      return Err(Error::MissingScope { kind: EntityKind::Team });
    }
    Ok(Self {
      id,
      name_display: team.name_display.clone(),
      account_id: team.account_id,
      is_active: team.record.is_active,
    })
  }

  pub fn id(&self) -> Uuid { self.id }

  pub fn name_display(&self) -> &str { &self.name_display }

  pub fn account_id(&self) -> Uuid { self.account_id }

  pub fn is_active(&self) -> bool { self.is_active }

  /// Whether this snapshot still matches `team` as it is now.
  pub fn is_current_for(&self, team: &Team) -> bool {
    Self::project(team).is_ok_and(|fresh| fresh == *self)
  }
}
