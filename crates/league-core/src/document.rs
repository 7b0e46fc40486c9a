//! The shared container's polymorphic document.
//!
//! All five kinds are stored side by side. On the way in a [`Document`] is
//! flattened into an [`Envelope`]: the routing columns (id, partition key,
//! discriminator list, active flag) plus the JSON body. On the way out the
//! discriminator list alone decides which variant the body is decoded as.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
  Error, Result,
  account::Account,
  entity::{Entity, EntityKind, PartitionKey},
  game::Game,
  team::Team,
  user::{Coach, Player},
};

/// Body keys written next to the entity's own fields, mirroring the routing
/// columns so a raw body is self-describing.
const ITEM_TYPE_KEY: &str = "itemType";
const PARTITION_KEY_KEY: &str = "partitionKey";

// ─── Document ────────────────────────────────────────────────────────────────

/// One of the five entity kinds, tagged by its discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
  Account(Account),
  Team(Team),
  Player(Player),
  Coach(Coach),
  Game(Game),
}

impl Document {
  pub fn kind(&self) -> EntityKind {
    match self {
      Self::Account(_) => EntityKind::Account,
      Self::Team(_) => EntityKind::Team,
      Self::Player(_) => EntityKind::Player,
      Self::Coach(_) => EntityKind::Coach,
      Self::Game(_) => EntityKind::Game,
    }
  }

  /// Flatten into routing columns and a JSON body.
  pub fn into_envelope(self) -> Result<Envelope> {
    match self {
      Self::Account(e) => Envelope::of(&e),
      Self::Team(e) => Envelope::of(&e),
      Self::Player(e) => Envelope::of(&e),
      Self::Coach(e) => Envelope::of(&e),
      Self::Game(e) => Envelope::of(&e),
    }
  }

  /// Decode a stored envelope, dispatching on its discriminator list.
  pub fn from_envelope(envelope: Envelope) -> Result<Self> {
    let kind = EntityKind::from_item_type(&envelope.item_type)
      .ok_or_else(|| Error::UnknownItemType(envelope.item_type.clone()))?;

    let body = envelope.body;
    Ok(match kind {
      EntityKind::Account => Self::Account(serde_json::from_value(body)?),
      EntityKind::Team => Self::Team(serde_json::from_value(body)?),
      EntityKind::Player => Self::Player(serde_json::from_value(body)?),
      EntityKind::Coach => Self::Coach(serde_json::from_value(body)?),
      EntityKind::Game => Self::Game(serde_json::from_value(body)?),
    })
  }
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// A document as the container sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
  pub id:            Uuid,
  pub partition_key: PartitionKey,
  /// Discriminator labels, most specific last.
  pub item_type:     Vec<String>,
  pub is_active:     bool,
  pub body:          Value,
}

impl Envelope {
  fn of<E: Entity>(entity: &E) -> Result<Self> {
    let id = entity.id()?;
    let partition_key = entity.partition_key()?;
    let item_type: Vec<String> =
      entity.item_type().iter().map(|s| (*s).to_owned()).collect();

    let mut body = serde_json::to_value(entity)?;
    if let Value::Object(map) = &mut body {
      map.insert(ITEM_TYPE_KEY.to_owned(), serde_json::to_value(&item_type)?);
      map.insert(
        PARTITION_KEY_KEY.to_owned(),
        Value::String(partition_key.to_string()),
      );
    }

    Ok(Self {
      id,
      partition_key,
      item_type,
      is_active: entity.is_active(),
      body,
    })
  }

  pub fn kind(&self) -> Option<EntityKind> {
    EntityKind::from_item_type(&self.item_type)
  }
}
