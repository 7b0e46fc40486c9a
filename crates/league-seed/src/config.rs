//! Seeder configuration, read once at startup.
//!
//! Sources, later overriding earlier: built-in defaults, an optional TOML
//! file, then `LEAGUE_*` environment variables (e.g. `LEAGUE_CONTAINER`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::seeder::SeedOptions;

pub const DEFAULT_CONTAINER: &str = "entities";
pub const DEFAULT_STORE_PATH: &str = "league.db";

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
  /// The container every entity kind is written to.
  pub container:        String,
  /// SQLite database file; `:memory:` for a throwaway run.
  pub store_path:       PathBuf,
  /// Fail instead of falling back to the local copy when a read-back
  /// misses.
  pub strict_read_back: bool,
}

impl SeedConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("container", DEFAULT_CONTAINER)?
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .set_default("strict_read_back", false)?
      .add_source(File::from(path.to_path_buf()).required(false))
      .add_source(Environment::with_prefix("LEAGUE"))
      .build()?
      .try_deserialize()
  }

  pub fn seed_options(&self) -> SeedOptions {
    SeedOptions { strict_read_back: self.strict_read_back }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg =
      SeedConfig::load(Path::new("does-not-exist/league.toml")).unwrap();
    assert_eq!(cfg.container, DEFAULT_CONTAINER);
    assert_eq!(cfg.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    assert!(!cfg.strict_read_back);
    assert!(!cfg.seed_options().strict_read_back);
  }
}
