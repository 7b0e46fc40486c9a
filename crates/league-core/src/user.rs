//! Users of a league: players and coaches.
//!
//! Both share the `User` level of the hierarchy ([`UserProfile`]) and are
//! stored with `["User", <kind>]` discriminators, so a query on `User`
//! returns both.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  document::Document,
  entity::{AuditMetadata, Entity, EntityKind, Record},
  team::TeamOverview,
};

/// Fields common to every user, flattened into the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub account_id: Uuid,
  pub full_name:  String,
  pub email:      String,
}

impl UserProfile {
  pub fn new(
    account_id: Uuid,
    full_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      account_id,
      full_name: full_name.into(),
      email: email.into(),
    }
  }
}

// ─── Player ──────────────────────────────────────────────────────────────────

/// A player's membership of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignment {
  pub team_id:       Uuid,
  pub team_overview: TeamOverview,
  /// Free text, e.g. "Forward".
  pub role:          String,
  pub joined_at:     DateTime<Utc>,
}

impl TeamAssignment {
  pub fn new(
    team: TeamOverview,
    role: impl Into<String>,
    joined_at: DateTime<Utc>,
  ) -> Self {
    Self {
      team_id: team.id(),
      team_overview: team,
      role: role.into(),
      joined_at,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
  #[serde(flatten)]
  pub record:           Record,
  #[serde(flatten)]
  pub profile:          UserProfile,
  pub birth_date:       Option<NaiveDate>,
  pub team_assignments: Vec<TeamAssignment>,
}

impl Player {
  pub fn new(
    profile: UserProfile,
    birth_date: Option<NaiveDate>,
    audit: AuditMetadata,
  ) -> Self {
    Self {
      record: Record::new(audit),
      profile,
      birth_date,
      team_assignments: Vec::new(),
    }
  }

  pub fn assign(
    &mut self,
    team: TeamOverview,
    role: impl Into<String>,
    joined_at: DateTime<Utc>,
  ) {
    self
      .team_assignments
      .push(TeamAssignment::new(team, role, joined_at));
  }
}

impl Entity for Player {
  const KIND: EntityKind = EntityKind::Player;

  fn record(&self) -> &Record { &self.record }

  fn record_mut(&mut self) -> &mut Record { &mut self.record }

  fn scope(&self) -> Option<Uuid> { Some(self.profile.account_id) }

  fn team_references(&self) -> Vec<&TeamOverview> {
    self
      .team_assignments
      .iter()
      .map(|assignment| &assignment.team_overview)
      .collect()
  }

  fn validate_embedded(&self) -> Result<()> {
    for assignment in &self.team_assignments {
      let overview_id = assignment.team_overview.id();
      if assignment.team_id != overview_id {
        return Err(Error::AssignmentMismatch {
          team_id: assignment.team_id,
          overview_id,
        });
      }
    }
    Ok(())
  }

  fn into_document(self) -> Document { Document::Player(self) }

  fn from_document(document: Document) -> Option<Self> {
    match document {
      Document::Player(player) => Some(player),
      _ => None,
    }
  }
}

// ─── Coach ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
  #[serde(flatten)]
  pub record:         Record,
  #[serde(flatten)]
  pub profile:        UserProfile,
  pub license_number: String,
  #[serde(default)]
  pub coached_teams:  Vec<TeamOverview>,
}

impl Coach {
  pub fn new(
    profile: UserProfile,
    license_number: impl Into<String>,
    audit: AuditMetadata,
  ) -> Self {
    Self {
      record: Record::new(audit),
      profile,
      license_number: license_number.into(),
      coached_teams: Vec::new(),
    }
  }

  pub fn coach(&mut self, team: TeamOverview) { self.coached_teams.push(team); }
}

impl Entity for Coach {
  const KIND: EntityKind = EntityKind::Coach;

  fn record(&self) -> &Record { &self.record }

  fn record_mut(&mut self) -> &mut Record { &mut self.record }

  fn scope(&self) -> Option<Uuid> { Some(self.profile.account_id) }

  fn team_references(&self) -> Vec<&TeamOverview> {
    self.coached_teams.iter().collect()
  }

  fn into_document(self) -> Document { Document::Coach(self) }

  fn from_document(document: Document) -> Option<Self> {
    match document {
      Document::Coach(coach) => Some(coach),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::team::Team;

  fn audit() -> AuditMetadata { AuditMetadata::new("test", Utc::now()) }

  fn overview(account_id: Uuid, name: &str) -> TeamOverview {
    TeamOverview::project(&Team::new(account_id, name, audit())).unwrap()
  }

  #[test]
  fn player_rejects_team_from_other_account() {
    let account_id = Uuid::new_v4();
    let foreign = overview(Uuid::new_v4(), "Ajeno");

    let mut player = Player::new(
      UserProfile::new(account_id, "Juan Pérez", "juan@email.com"),
      None,
      audit(),
    );
    player.assign(foreign.clone(), "Forward", Utc::now());

    match player.validate() {
      Err(Error::CrossTenant { kind, team_id, .. }) => {
        assert_eq!(kind, EntityKind::Player);
        assert_eq!(team_id, foreign.id());
      }
      other => panic!("expected CrossTenant, got {other:?}"),
    }
  }

  #[test]
  fn player_rejects_mismatched_assignment() {
    let account_id = Uuid::new_v4();
    let mut player = Player::new(
      UserProfile::new(account_id, "Juan Pérez", "juan@email.com"),
      None,
      audit(),
    );
    player.assign(overview(account_id, "Rojo"), "Forward", Utc::now());
    player.team_assignments[0].team_id = Uuid::new_v4();

    assert!(matches!(
      player.validate(),
      Err(Error::AssignmentMismatch { .. })
    ));
  }

  #[test]
  fn coach_rejects_team_from_other_account() {
    let mut coach = Coach::new(
      UserProfile::new(Uuid::new_v4(), "Fernando Martínez", "f@email.com"),
      "UEFA-2023",
      audit(),
    );
    coach.coach(overview(Uuid::new_v4(), "Ajeno"));
    assert!(matches!(coach.validate(), Err(Error::CrossTenant { .. })));
  }

  #[test]
  fn same_account_references_validate() {
    let account_id = Uuid::new_v4();
    let rojo = overview(account_id, "Rojo");

    let mut player = Player::new(
      UserProfile::new(account_id, "Carlos López", "carlos@email.com"),
      NaiveDate::from_ymd_opt(2000, 5, 17),
      audit(),
    );
    player.assign(rojo.clone(), "Midfielder", Utc::now());
    player.validate().unwrap();

    let mut coach = Coach::new(
      UserProfile::new(account_id, "Roberto Hernández", "r@email.com"),
      "UEFA-2022",
      audit(),
    );
    coach.coach(rojo);
    coach.validate().unwrap();
  }

  #[test]
  fn profile_is_flattened_on_the_wire() {
    let player = Player::new(
      UserProfile::new(Uuid::new_v4(), "Diego García", "diego@email.com"),
      None,
      audit(),
    );
    let json = serde_json::to_value(&player).unwrap();
    assert_eq!(json["fullName"], "Diego García");
    assert_eq!(json["accountId"], player.profile.account_id.to_string());
    assert!(json["teamAssignments"].as_array().unwrap().is_empty());
    assert!(json.get("auditMetadata").is_some());
  }
}
