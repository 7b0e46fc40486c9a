//! Game — a fixture between two teams of the same account.
//!
//! Both sides are embedded [`TeamOverview`] snapshots rather than team ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  document::Document,
  entity::{AuditMetadata, Entity, EntityKind, Record},
  team::TeamOverview,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
  #[serde(flatten)]
  pub record:       Record,
  pub account_id:   Uuid,
  pub home_team:    TeamOverview,
  pub away_team:    TeamOverview,
  pub scheduled_at: DateTime<Utc>,
}

impl Game {
  pub fn new(
    account_id: Uuid,
    home_team: TeamOverview,
    away_team: TeamOverview,
    scheduled_at: DateTime<Utc>,
    audit: AuditMetadata,
  ) -> Self {
    Self {
      record: Record::new(audit),
      account_id,
      home_team,
      away_team,
      scheduled_at,
    }
  }
}

impl Entity for Game {
  const KIND: EntityKind = EntityKind::Game;

  fn record(&self) -> &Record { &self.record }

  fn record_mut(&mut self) -> &mut Record { &mut self.record }

  fn scope(&self) -> Option<Uuid> { Some(self.account_id) }

  fn team_references(&self) -> Vec<&TeamOverview> {
    vec![&self.home_team, &self.away_team]
  }

  fn into_document(self) -> Document { Document::Game(self) }

  fn from_document(document: Document) -> Option<Self> {
    match document {
      Document::Game(game) => Some(game),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Error, team::Team};

  #[test]
  fn away_team_from_other_account_is_rejected() {
    let audit = || AuditMetadata::new("test", Utc::now());
    let account_id = Uuid::new_v4();
    let home =
      TeamOverview::project(&Team::new(account_id, "Rojo", audit())).unwrap();
    let away =
      TeamOverview::project(&Team::new(Uuid::new_v4(), "Azul", audit()))
        .unwrap();

    let game = Game::new(account_id, home, away.clone(), Utc::now(), audit());
    match game.validate() {
      Err(Error::CrossTenant { kind, team_id, .. }) => {
        assert_eq!(kind, EntityKind::Game);
        assert_eq!(team_id, away.id());
      }
      other => panic!("expected CrossTenant, got {other:?}"),
    }
  }
}
