//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, Utc};
use league_core::{
  ErrorKind,
  account::Account,
  cancel::CancelSignal,
  document::Document,
  entity::{AuditMetadata, Entity, PartitionKey},
  game::Game,
  repository::Repository,
  store::DocumentStore,
  team::{Team, TeamOverview},
  user::{Coach, Player, UserProfile},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory("entities")
    .await
    .expect("in-memory store")
}

fn audit() -> AuditMetadata { AuditMetadata::new("seeder", Utc::now()) }

fn repo<E: Entity>(s: &SqliteStore) -> Repository<'_, SqliteStore, E> {
  Repository::new(s, CancelSignal::never())
}

/// Create through the repository, then read back by (id, partition key).
async fn write_then_read<E>(s: &SqliteStore, entity: &E) -> E
where
  E: Entity + PartialEq + std::fmt::Debug,
{
  let r = repo::<E>(s);
  r.create(entity).await.unwrap();
  r.get(entity.id().unwrap(), &entity.partition_key().unwrap())
    .await
    .unwrap()
}

// ─── Read-after-write ────────────────────────────────────────────────────────

#[tokio::test]
async fn every_kind_reads_back_field_for_field() {
  let s = store().await;

  let account = Account::new("Distrito de Fútbol Metropolitano", audit());
  assert_eq!(write_then_read(&s, &account).await, account);

  let account_id = account.id().unwrap();
  let rojo = Team::new(account_id, "Equipo Rojo", audit());
  let azul = Team::new(account_id, "Equipo Azul", audit());
  assert_eq!(write_then_read(&s, &rojo).await, rojo);
  assert_eq!(write_then_read(&s, &azul).await, azul);

  let rojo_view = TeamOverview::project(&rojo).unwrap();
  let azul_view = TeamOverview::project(&azul).unwrap();

  let mut player = Player::new(
    UserProfile::new(account_id, "Juan Pérez", "juan@email.com"),
    NaiveDate::from_ymd_opt(2001, 3, 9),
    audit(),
  );
  player.assign(rojo_view.clone(), "Forward", Utc::now());
  assert_eq!(write_then_read(&s, &player).await, player);

  let mut coach = Coach::new(
    UserProfile::new(account_id, "Fernando Martínez", "fernando@email.com"),
    "UEFA-2023",
    audit(),
  );
  coach.coach(rojo_view.clone());
  assert_eq!(write_then_read(&s, &coach).await, coach);

  let game = Game::new(account_id, rojo_view, azul_view, Utc::now(), audit());
  assert_eq!(write_then_read(&s, &game).await, game);

  assert_eq!(s.verify_container().await.unwrap(), 6);
}

#[tokio::test]
async fn inactive_flag_survives() {
  let s = store().await;
  let mut team = Team::new(Uuid::new_v4(), "Equipo Retirado", audit());
  team.record.is_active = false;
  let read = write_then_read(&s, &team).await;
  assert!(!read.is_active());
}

// ─── Raw envelope access ─────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let got = s
    .get(Uuid::new_v4(), PartitionKey::from(Uuid::new_v4()))
    .await
    .unwrap();
  assert!(got.is_none());
}

#[tokio::test]
async fn envelope_roundtrip_preserves_discriminators() {
  let s = store().await;
  let coach = Coach::new(
    UserProfile::new(Uuid::new_v4(), "Roberto Hernández", "r@email.com"),
    "UEFA-2022",
    audit(),
  );
  let envelope = Document::Coach(coach.clone()).into_envelope().unwrap();
  s.create(envelope.clone()).await.unwrap();

  let read = s
    .get(envelope.id, envelope.partition_key.clone())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(read, envelope);
  assert_eq!(read.item_type, ["User", "Coach"]);
}

// ─── Conflicts ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_id_and_partition_conflicts() {
  let s = store().await;
  let team = Team::new(Uuid::new_v4(), "Equipo Rojo", audit());
  let envelope = Document::Team(team).into_envelope().unwrap();

  s.create(envelope.clone()).await.unwrap();
  let err = s.create(envelope).await.unwrap_err();
  assert!(matches!(err, Error::Conflict { .. }));

  let core: league_core::Error = err.into();
  assert_eq!(core.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn same_id_in_another_partition_is_a_different_document() {
  let s = store().await;
  let mut first = Team::new(Uuid::new_v4(), "Equipo Rojo", audit());
  let mut second = Team::new(Uuid::new_v4(), "Equipo Rojo", audit());
  let shared = Uuid::new_v4();
  first.record.id = Some(shared);
  second.record.id = Some(shared);

  write_then_read(&s, &first).await;
  write_then_read(&s, &second).await;
  assert_eq!(s.verify_container().await.unwrap(), 2);
}

// ─── Containers ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn containers_are_isolated() {
  let s = store().await;
  let other = s.with_container("archive").unwrap();

  let team = Team::new(Uuid::new_v4(), "Equipo Rojo", audit());
  repo::<Team>(&s).create(&team).await.unwrap();

  let pk = team.partition_key().unwrap();
  let id = team.id().unwrap();
  assert!(repo::<Team>(&other).find(id, &pk).await.unwrap().is_none());
  assert_eq!(other.verify_container().await.unwrap(), 0);

  // The same document may be created independently in the other container.
  repo::<Team>(&other).create(&team).await.unwrap();
}

#[tokio::test]
async fn blank_container_name_is_rejected() {
  assert!(matches!(
    SqliteStore::open_in_memory("").await,
    Err(Error::InvalidContainer(_))
  ));
  assert!(matches!(
    SqliteStore::open_in_memory(" entities").await,
    Err(Error::InvalidContainer(_))
  ));
}

// ─── Discriminator queries ───────────────────────────────────────────────────

#[tokio::test]
async fn user_label_matches_players_and_coaches() {
  let s = store().await;
  let account_id = Uuid::new_v4();
  let profile = |name: &str| UserProfile::new(account_id, name, "x@email.com");

  repo::<Player>(&s)
    .create(&Player::new(profile("Juan"), None, audit()))
    .await
    .unwrap();
  repo::<Coach>(&s)
    .create(&Coach::new(profile("Fernando"), "UEFA-2023", audit()))
    .await
    .unwrap();
  repo::<Team>(&s)
    .create(&Team::new(account_id, "Equipo Rojo", audit()))
    .await
    .unwrap();

  let pk = PartitionKey::from(account_id);
  assert_eq!(s.count_labelled(&pk, "User").await.unwrap(), 2);
  assert_eq!(s.count_labelled(&pk, "Coach").await.unwrap(), 1);
  assert_eq!(s.count_labelled(&pk, "Team").await.unwrap(), 1);

  let elsewhere = PartitionKey::from(Uuid::new_v4());
  assert_eq!(s.count_labelled(&elsewhere, "User").await.unwrap(), 0);
}
