//! chronicled — the Chronicle event-log server.
//!
//! Reads `config.toml` (or the path given with `--config`), builds an
//! in-memory event store, optionally seeds it from a JSON event file,
//! and serves the query API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use chronicle_core::{event::Event, store::EventLog as _};
use chronicle_store_mem::MemoryStore;
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Chronicle event-log server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// JSON event array to load into the store at startup.
  /// Overrides `seed_path` from the configuration file.
  #[arg(long)]
  seed: Option<PathBuf>,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `CHRONICLE_*` environment variables.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:      String,
  #[serde(default = "default_port")]
  port:      u16,
  #[serde(default)]
  seed_path: Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8719 }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CHRONICLE"))
    .build()
    .context("failed to read config")?;
  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = Arc::new(MemoryStore::new());

  if let Some(path) = cli.seed.or(server_cfg.seed_path.clone()) {
    let count = seed_store(&store, &path).await?;
    tracing::info!("seeded {count} events from {path:?}");
  }

  let app = chronicle_api::api_router(store).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Load a JSON array of interchange-shaped events into the store.
async fn seed_store(store: &MemoryStore, path: &Path) -> anyhow::Result<usize> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  let events: Vec<Event> =
    serde_json::from_str(&raw).context("seed file is not a JSON event array")?;
  let ids = store.insert_many(events).await?;
  Ok(ids.len())
}
