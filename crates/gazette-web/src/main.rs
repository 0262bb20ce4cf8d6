//! Gazette server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus any
//! `GAZETTE_*` environment variables, opens the SQLite store and the media
//! directory, and serves the site over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash`:
//!
//! ```
//! cargo run -p gazette-web -- hash-password
//! ```
//!
//! # Retention
//!
//! `gazette-web purge --days 30` deletes issues older than the window together
//! with their stored pages. Run it from cron; the server never purges.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::{Parser, Subcommand};
use gazette_core::{
  blob::{BlobPath, BlobStore as _},
  issue::{IssueDate, cutoff},
  store::IssueStore as _,
};
use gazette_storage_fs::FsBlobStore;
use gazette_store_sqlite::SqliteStore;
use gazette_web::{AppState, ServerConfig};
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Gazette newspaper server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the site (the default).
  Serve,
  /// Print the argon2 hash for a password entered on stdin and exit.
  HashPassword,
  /// Delete issues dated before the retention window, with their pages.
  Purge {
    /// Keep issues from this many days back.
    #[arg(long, default_value_t = gazette_api::DEFAULT_ARCHIVE_DAYS)]
    days: u32,
  },
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

  match cli.command.unwrap_or(Command::Serve) {
    Command::HashPassword => hash_password(),
    Command::Serve => serve(load_config(cli.config)?).await,
    Command::Purge { days } => purge(load_config(cli.config)?, days).await,
  }
}

fn load_config(path: PathBuf) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("GAZETTE"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  server_cfg.store_path = expand_tilde(&server_cfg.store_path);
  server_cfg.media_dir = expand_tilde(&server_cfg.media_dir);
  Ok(server_cfg)
}

async fn open_backends(cfg: &ServerConfig) -> anyhow::Result<(SqliteStore, FsBlobStore)> {
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let blobs = FsBlobStore::open(&cfg.media_dir, cfg.media_base())
    .await
    .with_context(|| format!("failed to open media directory {:?}", cfg.media_dir))?;
  Ok((store, blobs))
}

async fn serve(server_cfg: ServerConfig) -> anyhow::Result<()> {
  let (store, blobs) = open_backends(&server_cfg).await?;
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  let state = AppState::new(store, blobs, server_cfg);
  let app = gazette_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn purge(server_cfg: ServerConfig, days: u32) -> anyhow::Result<()> {
  let (store, blobs) = open_backends(&server_cfg).await?;
  let before = cutoff(IssueDate::today(), days);

  let purged = store
    .purge_before(before)
    .await
    .context("failed to purge issues")?;

  let mut orphaned = 0usize;
  for date in &purged {
    if let Err(e) = blobs.remove_prefix(&BlobPath::issue_folder(*date)).await {
      tracing::warn!(%date, error = %e, "stored files for purged issue were not removed");
      orphaned += 1;
    }
  }

  tracing::info!(purged = purged.len(), %before, "purge finished");
  println!("Purged {} issue(s) dated before {before}", purged.len());
  if orphaned > 0 {
    anyhow::bail!("{orphaned} issue folder(s) could not be removed");
  }
  Ok(())
}

fn hash_password() -> anyhow::Result<()> {
  let password = read_password()?;
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
    .to_string();
  println!("{hash}");
  Ok(())
}

/// Read a password line from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\r', '\n']).to_string())
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
