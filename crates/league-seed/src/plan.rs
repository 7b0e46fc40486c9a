//! What to seed: one tenant graph described as plain data.
//!
//! Players, coaches and games refer to teams by their position in
//! [`SeedPlan::teams`]; [`SeedPlan::validate`] checks every reference before
//! anything is written.

use crate::error::SeedError;

/// Oldest age a planned player may be given.
pub const MAX_PLAYER_AGE_YEARS: u32 = 150;
/// Furthest a game may be scheduled from the run, in either direction.
pub const MAX_DAYS_OUT: i64 = 3650;

#[derive(Debug, Clone)]
pub struct PlayerPlan {
  pub full_name: String,
  pub email:     String,
  /// Index into [`SeedPlan::teams`].
  pub team:      usize,
  pub role:      String,
}

#[derive(Debug, Clone)]
pub struct CoachPlan {
  pub full_name:      String,
  pub email:          String,
  pub license_number: String,
  /// Index into [`SeedPlan::teams`].
  pub team:           usize,
}

#[derive(Debug, Clone)]
pub struct GamePlan {
  pub home:     usize,
  pub away:     usize,
  /// Kick-off, in days after the run.
  pub days_out: i64,
}

#[derive(Debug, Clone)]
pub struct SeedPlan {
  pub account_name:     String,
  /// Recorded as created-by/modified-by on every document.
  pub actor:            String,
  pub teams:            Vec<String>,
  pub players:          Vec<PlayerPlan>,
  /// Players' birth dates are set this many years before the run.
  pub player_age_years: u32,
  pub coaches:          Vec<CoachPlan>,
  pub games:            Vec<GamePlan>,
}

impl SeedPlan {
  /// The demo tenant: one account, two teams, three players, two coaches
  /// and a home-and-away pair of games.
  pub fn demo() -> Self {
    let player = |full_name: &str, email: &str, team, role: &str| PlayerPlan {
      full_name: full_name.into(),
      email: email.into(),
      team,
      role: role.into(),
    };
    let coach = |full_name: &str, email: &str, license: &str, team| CoachPlan {
      full_name: full_name.into(),
      email: email.into(),
      license_number: license.into(),
      team,
    };

    Self {
      account_name:     "Distrito de Fútbol Metropolitano".into(),
      actor:            "seeder".into(),
      teams:            vec!["Equipo Rojo".into(), "Equipo Azul".into()],
      players:          vec![
        player("Juan Pérez", "juan@email.com", 0, "Forward"),
        player("Carlos López", "carlos@email.com", 0, "Midfielder"),
        player("Diego García", "diego@email.com", 1, "Defender"),
      ],
      player_age_years: 25,
      coaches:          vec![
        coach("Fernando Martínez", "fernando@email.com", "UEFA-2023", 0),
        coach("Roberto Hernández", "roberto@email.com", "UEFA-2022", 1),
      ],
      games:            vec![
        GamePlan { home: 0, away: 1, days_out: 7 },
        GamePlan { home: 1, away: 0, days_out: 14 },
      ],
    }
  }

  /// Reject dangling team references, empty names and dates the run could
  /// not compute.
  pub fn validate(&self) -> Result<(), SeedError> {
    if self.account_name.trim().is_empty() {
      return Err(SeedError::Plan("account name is empty".into()));
    }
    if let Some(i) = self.teams.iter().position(|t| t.trim().is_empty()) {
      return Err(SeedError::Plan(format!("team {i} has an empty name")));
    }
    if self.player_age_years > MAX_PLAYER_AGE_YEARS {
      return Err(SeedError::Plan(format!(
        "player age of {} years exceeds {MAX_PLAYER_AGE_YEARS}",
        self.player_age_years
      )));
    }

    let check = |what: &str, i: usize, team: usize| {
      if team < self.teams.len() {
        Ok(())
      } else {
        Err(SeedError::Plan(format!(
          "{what} {i} refers to team {team}, but only {} are planned",
          self.teams.len()
        )))
      }
    };

    for (i, p) in self.players.iter().enumerate() {
      check("player", i, p.team)?;
    }
    for (i, c) in self.coaches.iter().enumerate() {
      check("coach", i, c.team)?;
    }
    for (i, g) in self.games.iter().enumerate() {
      check("game", i, g.home)?;
      check("game", i, g.away)?;
      if !(-MAX_DAYS_OUT..=MAX_DAYS_OUT).contains(&g.days_out) {
        return Err(SeedError::Plan(format!(
          "game {i} is {} days out, beyond {MAX_DAYS_OUT}",
          g.days_out
        )));
      }
      if g.home == g.away {
        return Err(SeedError::Plan(format!("game {i} pits a team against itself")));
      }
    }
    Ok(())
  }
}

impl Default for SeedPlan {
  fn default() -> Self { Self::demo() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn demo_plan_is_valid() {
    let plan = SeedPlan::demo();
    plan.validate().unwrap();
    assert_eq!(plan.teams.len(), 2);
    assert_eq!(plan.players.len(), 3);
    assert_eq!(plan.coaches.len(), 2);
    assert_eq!(plan.games.len(), 2);
  }

  #[test]
  fn dangling_team_reference_is_rejected() {
    let mut plan = SeedPlan::demo();
    plan.coaches[1].team = 2;
    assert!(matches!(plan.validate(), Err(SeedError::Plan(msg)) if msg.contains("coach 1")));
  }

  #[test]
  fn self_match_is_rejected() {
    let mut plan = SeedPlan::demo();
    plan.games[0].away = 0;
    assert!(matches!(plan.validate(), Err(SeedError::Plan(_))));
  }

  #[test]
  fn player_age_is_bounded() {
    let mut plan = SeedPlan::demo();
    plan.player_age_years = MAX_PLAYER_AGE_YEARS;
    plan.validate().unwrap();

    plan.player_age_years = u32::MAX / 2;
    assert!(matches!(plan.validate(), Err(SeedError::Plan(msg)) if msg.contains("player age")));
  }

  #[test]
  fn days_out_is_bounded() {
    let mut plan = SeedPlan::demo();
    plan.games[0].days_out = -MAX_DAYS_OUT;
    plan.validate().unwrap();

    plan.games[0].days_out = i64::MAX / 1000;
    assert!(matches!(plan.validate(), Err(SeedError::Plan(msg)) if msg.contains("game 0")));

    plan.games[0].days_out = i64::MIN;
    assert!(matches!(plan.validate(), Err(SeedError::Plan(_))));
  }
}
