//! league-seed binary.
//!
//! Reads `league.toml` (or the path given with `--config`), opens the SQLite
//! store, checks the configured container is reachable and seeds the demo
//! tenant. Exits non-zero if any stage fails. Ctrl-C cancels the in-flight
//! store operation and aborts the run.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use league_core::cancel::cancel_pair;
use league_seed::{SeedConfig, SeedPlan, Seeder};
use league_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Seed a demo tenant into the league document store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "league.toml")]
  config: PathBuf,

  /// Display name of the seeded account, instead of the demo one.
  #[arg(long)]
  account_name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = SeedConfig::load(&cli.config)
    .with_context(|| format!("failed to read configuration from {:?}", cli.config))?;

  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path, &cfg.container)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let existing = store
    .verify_container()
    .await
    .with_context(|| format!("failed to reach container {:?}", cfg.container))?;
  tracing::info!(
    container = %cfg.container,
    documents = existing,
    "connected to container"
  );

  let mut plan = SeedPlan::demo();
  if let Some(name) = cli.account_name {
    plan.account_name = name;
  }

  let (cancel, signal) = cancel_pair();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::warn!("interrupt received, cancelling");
      cancel.cancel();
    }
  });

  let seeder = Seeder::new(&store, plan)
    .with_options(cfg.seed_options())
    .with_cancel(signal);

  match seeder.run().await {
    Ok(report) => {
      tracing::info!(
        account_id = ?report.account.record.id,
        documents = report.document_count(),
        "demo data seeded"
      );
      Ok(())
    }
    Err(err) => {
      tracing::error!(kind = %err.kind(), stage = ?err.stage(), "seeding aborted: {err}");
      Err(err).context("seeding failed")
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
