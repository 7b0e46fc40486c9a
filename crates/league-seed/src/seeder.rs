//! The seeding state machine.
//!
//! A run walks `Start → AccountCreated → TeamsCreated → OverviewsProjected →
//! PlayersCreated → CoachesCreated → GamesCreated → Done`. The order is fixed:
//! each stage needs ids produced by the one before it (every descendant is
//! partitioned by the account id, players embed team snapshots, and so on).
//!
//! Every entity goes through write-then-read: create, then point-read the
//! same (id, partition key), and carry the *read-back* copy forward. If the
//! read unexpectedly misses, the locally built value is used instead and a
//! warning is logged, unless [`SeedOptions::strict_read_back`] is set.
//!
//! Failure handling is all-or-nothing for the run, but nothing already
//! written is rolled back. This is a demo seed, not a production write path.

use chrono::{DateTime, Months, TimeDelta, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use league_core::{
  Error,
  account::Account,
  cancel::CancelSignal,
  entity::{AuditMetadata, Entity},
  game::Game,
  repository::Repository,
  store::DocumentStore,
  team::{Team, TeamOverview},
  user::{Coach, Player, UserProfile},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
  error::{Operation, SeedError},
  plan::SeedPlan,
};

// ─── Stages ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Stage {
  Start,
  AccountCreated,
  TeamsCreated,
  OverviewsProjected,
  PlayersCreated,
  CoachesCreated,
  GamesCreated,
  Done,
}

/// Where a run is, together with everything the remaining stages need.
#[derive(Debug)]
pub enum SeedState {
  Start,
  AccountCreated {
    account: Account,
  },
  TeamsCreated {
    account: Account,
    teams:   Vec<Team>,
  },
  OverviewsProjected {
    account:   Account,
    teams:     Vec<Team>,
    overviews: Vec<TeamOverview>,
  },
  PlayersCreated {
    account:   Account,
    teams:     Vec<Team>,
    overviews: Vec<TeamOverview>,
    players:   Vec<Player>,
  },
  CoachesCreated {
    account:   Account,
    teams:     Vec<Team>,
    overviews: Vec<TeamOverview>,
    players:   Vec<Player>,
    coaches:   Vec<Coach>,
  },
  GamesCreated(SeedReport),
  Done(SeedReport),
}

impl SeedState {
  pub fn stage(&self) -> Stage {
    match self {
      Self::Start => Stage::Start,
      Self::AccountCreated { .. } => Stage::AccountCreated,
      Self::TeamsCreated { .. } => Stage::TeamsCreated,
      Self::OverviewsProjected { .. } => Stage::OverviewsProjected,
      Self::PlayersCreated { .. } => Stage::PlayersCreated,
      Self::CoachesCreated { .. } => Stage::CoachesCreated,
      Self::GamesCreated(_) => Stage::GamesCreated,
      Self::Done(_) => Stage::Done,
    }
  }
}

/// Every document a successful run persisted, as read back from the store.
#[derive(Debug, Clone)]
pub struct SeedReport {
  pub account:   Account,
  pub teams:     Vec<Team>,
  pub overviews: Vec<TeamOverview>,
  pub players:   Vec<Player>,
  pub coaches:   Vec<Coach>,
  pub games:     Vec<Game>,
}

impl SeedReport {
  /// Number of stored documents; overviews are embedded, not stored.
  pub fn document_count(&self) -> usize {
    1 + self.teams.len()
      + self.players.len()
      + self.coaches.len()
      + self.games.len()
  }
}

// ─── Seeder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
  /// Treat a missed read-back as a `NotFound` failure instead of falling
  /// back to the locally built value.
  pub strict_read_back: bool,
}

/// Drives one run against a store. The seeder is the only writer for the
/// duration of the run.
pub struct Seeder<'s, S> {
  store:   &'s S,
  plan:    SeedPlan,
  options: SeedOptions,
  cancel:  CancelSignal,
}

impl<'s, S: DocumentStore> Seeder<'s, S> {
  pub fn new(store: &'s S, plan: SeedPlan) -> Self {
    Self {
      store,
      plan,
      options: SeedOptions::default(),
      cancel: CancelSignal::never(),
    }
  }

  pub fn with_options(mut self, options: SeedOptions) -> Self {
    self.options = options;
    self
  }

  pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
    self.cancel = cancel;
    self
  }

  pub fn plan(&self) -> &SeedPlan { &self.plan }

  /// Run every stage to completion. The plan is validated before anything is
  /// written.
  pub async fn run(&self) -> Result<SeedReport, SeedError> {
    self.plan.validate()?;
    info!(account = %self.plan.account_name, "seeding started");

    let mut state = SeedState::Start;
    loop {
      match state {
        SeedState::Done(report) => {
          info!(documents = report.document_count(), "seeding completed");
          return Ok(report);
        }
        other => state = self.step(other).await?,
      }
    }
  }

  /// Advance by exactly one stage. `Done` is terminal and returned as is.
  pub async fn step(&self, state: SeedState) -> Result<SeedState, SeedError> {
    let next = match state {
      SeedState::Start => {
        let account = Account::new(&self.plan.account_name, self.audit(Utc::now()));
        let account = self.persist(Stage::AccountCreated, account).await?;
        info!(
          account_id = ?account.record.id,
          name = %account.display_name,
          "account created"
        );
        SeedState::AccountCreated { account }
      }

      SeedState::AccountCreated { account } => {
        let account_id = self.account_id(&account, Stage::TeamsCreated)?;
        let teams = self
          .plan
          .teams
          .iter()
          .map(|name| Team::new(account_id, name, self.audit(Utc::now())))
          .collect();
        let teams = self.persist_all(Stage::TeamsCreated, teams).await?;
        for team in &teams {
          info!(team_id = ?team.record.id, name = %team.name_display, "team created");
        }
        SeedState::TeamsCreated { account, teams }
      }

      SeedState::TeamsCreated { account, teams } => {
        let overviews = teams
          .iter()
          .map(|team| {
            TeamOverview::project(team).map_err(|e| {
              SeedError::entity(Stage::OverviewsProjected, Operation::Project, team, e)
            })
          })
          .collect::<Result<Vec<_>, _>>()?;
        debug!(count = overviews.len(), "team overviews projected");
        SeedState::OverviewsProjected { account, teams, overviews }
      }

      SeedState::OverviewsProjected { account, teams, overviews } => {
        let account_id = self.account_id(&account, Stage::PlayersCreated)?;
        let now = Utc::now();
        let age = self.plan.player_age_years;
        let birth_date = age
          .checked_mul(12)
          .and_then(|months| now.date_naive().checked_sub_months(Months::new(months)))
          .ok_or_else(|| {
            SeedError::Plan(format!("player age of {age} years is out of range"))
          })?;

        let players = self
          .plan
          .players
          .iter()
          .map(|p| {
            let mut player = Player::new(
              UserProfile::new(account_id, &p.full_name, &p.email),
              Some(birth_date),
              self.audit(now),
            );
            player.assign(overview_at(&overviews, p.team)?, &p.role, now);
            Ok(player)
          })
          .collect::<Result<Vec<_>, SeedError>>()?;
        let players = self.persist_all(Stage::PlayersCreated, players).await?;
        for player in &players {
          for assignment in &player.team_assignments {
            info!(
              player = %player.profile.full_name,
              team = %assignment.team_overview.name_display(),
              role = %assignment.role,
              "player created and assigned"
            );
          }
        }
        SeedState::PlayersCreated { account, teams, overviews, players }
      }

      SeedState::PlayersCreated { account, teams, overviews, players } => {
        let account_id = self.account_id(&account, Stage::CoachesCreated)?;
        let coaches = self
          .plan
          .coaches
          .iter()
          .map(|c| {
            let mut coach = Coach::new(
              UserProfile::new(account_id, &c.full_name, &c.email),
              &c.license_number,
              self.audit(Utc::now()),
            );
            coach.coach(overview_at(&overviews, c.team)?);
            Ok(coach)
          })
          .collect::<Result<Vec<_>, SeedError>>()?;
        let coaches = self.persist_all(Stage::CoachesCreated, coaches).await?;
        for coach in &coaches {
          info!(
            coach = %coach.profile.full_name,
            license = %coach.license_number,
            "coach created"
          );
        }
        SeedState::CoachesCreated { account, teams, overviews, players, coaches }
      }

      SeedState::CoachesCreated { account, teams, overviews, players, coaches } => {
        let account_id = self.account_id(&account, Stage::GamesCreated)?;
        let now = Utc::now();
        let games = self
          .plan
          .games
          .iter()
          .map(|g| {
            let scheduled_at = TimeDelta::try_days(g.days_out)
              .and_then(|offset| now.checked_add_signed(offset))
              .ok_or_else(|| {
                SeedError::Plan(format!("game {} days out is out of range", g.days_out))
              })?;
            Ok(Game::new(
              account_id,
              overview_at(&overviews, g.home)?,
              overview_at(&overviews, g.away)?,
              scheduled_at,
              self.audit(now),
            ))
          })
          .collect::<Result<Vec<_>, SeedError>>()?;
        let games = self.persist_all(Stage::GamesCreated, games).await?;
        for game in &games {
          info!(
            home = %game.home_team.name_display(),
            away = %game.away_team.name_display(),
            scheduled_at = %game.scheduled_at,
            "game scheduled"
          );
        }
        SeedState::GamesCreated(SeedReport {
          account,
          teams,
          overviews,
          players,
          coaches,
          games,
        })
      }

      SeedState::GamesCreated(report) => SeedState::Done(report),
      SeedState::Done(report) => SeedState::Done(report),
    };
    debug!(stage = %next.stage(), "stage reached");
    Ok(next)
  }

  fn audit(&self, at: DateTime<Utc>) -> AuditMetadata {
    AuditMetadata::new(&self.plan.actor, at)
  }

  fn account_id(&self, account: &Account, stage: Stage) -> Result<Uuid, SeedError> {
    account
      .id()
      .map_err(|e| SeedError::entity(stage, Operation::Derive, account, e))
  }

  /// Write-then-read one entity.
  async fn persist<E: Entity>(&self, stage: Stage, entity: E) -> Result<E, SeedError> {
    let repo = Repository::<S, E>::new(self.store, self.cancel.clone());

    let fail = |e| SeedError::entity(stage, Operation::Derive, &entity, e);
    let id = entity.id().map_err(fail)?;
    let partition_key = entity.partition_key().map_err(fail)?;

    repo
      .create(&entity)
      .await
      .map_err(|e| SeedError::entity(stage, Operation::Create, &entity, e))?;
    debug!(kind = %E::KIND, %id, %partition_key, "document inserted");

    let read_back = repo
      .find(id, &partition_key)
      .await
      .map_err(|e| SeedError::entity(stage, Operation::ReadBack, &entity, e))?;

    match read_back {
      Some(saved) => Ok(saved),
      None if self.options.strict_read_back => Err(SeedError::entity(
        stage,
        Operation::ReadBack,
        &entity,
        Error::NotFound { id, partition_key },
      )),
      None => {
        warn!(
          kind = %E::KIND,
          %id,
          %partition_key,
          "read-back missed; continuing with the local copy"
        );
        Ok(entity)
      }
    }
  }

  /// Write-then-read siblings concurrently. Every sibling runs to
  /// completion; if any failed, the first failure is returned and the rest
  /// are logged. Output order matches input order.
  async fn persist_all<E: Entity>(
    &self,
    stage: Stage,
    entities: Vec<E>,
  ) -> Result<Vec<E>, SeedError> {
    let mut saved: Vec<Option<E>> = vec![None; entities.len()];
    let mut failures = Vec::new();

    let mut pending: FuturesUnordered<_> = entities
      .into_iter()
      .enumerate()
      .map(|(i, entity)| async move { (i, self.persist(stage, entity).await) })
      .collect();

    while let Some((i, result)) = pending.next().await {
      match result {
        Ok(entity) => saved[i] = Some(entity),
        Err(e) => failures.push(e),
      }
    }

    let mut failures = failures.into_iter();
    if let Some(first) = failures.next() {
      for other in failures {
        error!(%stage, error = %other, "sibling write failed");
      }
      return Err(first);
    }
    Ok(saved.into_iter().flatten().collect())
  }
}

/// The snapshot of the planned team at `index`.
fn overview_at(
  overviews: &[TeamOverview],
  index: usize,
) -> Result<TeamOverview, SeedError> {
  overviews.get(index).cloned().ok_or_else(|| {
    SeedError::Plan(format!("no team at index {index}"))
  })
}
