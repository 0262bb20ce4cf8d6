//! The Gazette web site.
//!
//! Public pages show the latest issue, a single issue by date and the
//! archive. The admin panel, behind a cookie session, publishes and deletes
//! issues. Page images are served from the media directory and the JSON API
//! from [`gazette_api`] is mounted under `/api`.

pub mod auth;
pub mod error;
pub mod gallery;
pub mod handlers;
pub mod html;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use gazette_core::{blob::BlobStore, store::IssueStore};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::MemoryStore;

use auth::AuthConfig;
use handlers::{admin, archive, home, issue, login};

/// Mount point of the admin panel; the session cookie is scoped to it.
pub const ADMIN_PATH: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";
/// Mount point of the media directory.
pub const MEDIA_PATH: &str = "/media";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GAZETTE_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  /// Public origin, used to build page-image URLs.
  #[serde(default = "default_base_url")]
  pub base_url:            String,
  #[serde(default = "default_site_title")]
  pub site_title:          String,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  #[serde(default = "default_media_dir")]
  pub media_dir:           PathBuf,
  pub admin_email:         String,
  pub admin_password_hash: String,
  #[serde(default = "default_archive_days")]
  pub archive_days:        u32,
  #[serde(default = "default_session_ttl_hours")]
  pub session_ttl_hours:   u32,
  #[serde(default = "default_max_upload_mb")]
  pub max_upload_mb:       usize,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_base_url() -> String { "http://localhost:8080".to_string() }
fn default_site_title() -> String { "The Gazette".to_string() }
fn default_store_path() -> PathBuf { PathBuf::from("gazette.db") }
fn default_media_dir() -> PathBuf { PathBuf::from("media") }
fn default_archive_days() -> u32 { gazette_api::DEFAULT_ARCHIVE_DAYS }
fn default_session_ttl_hours() -> u32 { 12 }
fn default_max_upload_mb() -> usize { 64 }

impl ServerConfig {
  /// URL prefix under which stored page images are reachable.
  pub fn media_base(&self) -> String {
    format!("{}{MEDIA_PATH}", self.base_url.trim_end_matches('/'))
  }

  pub fn session_ttl(&self) -> time::Duration {
    time::Duration::hours(i64::from(self.session_ttl_hours))
  }

  /// Session cookies are HTTPS-only when the site is served over HTTPS.
  pub fn secure_cookies(&self) -> bool {
    self.base_url.starts_with("https://")
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, B> {
  pub store:    Arc<S>,
  pub blobs:    Arc<B>,
  pub config:   Arc<ServerConfig>,
  pub auth:     Arc<AuthConfig>,
  /// Server-side session records; clones share them.
  pub sessions: MemoryStore,
}

// Derived `Clone` would require `S: Clone` and `B: Clone`.
impl<S, B> Clone for AppState<S, B> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      blobs:    self.blobs.clone(),
      config:   self.config.clone(),
      auth:     self.auth.clone(),
      sessions: self.sessions.clone(),
    }
  }
}

impl<S, B> AppState<S, B> {
  pub fn new(store: S, blobs: B, config: ServerConfig) -> Self {
    let auth = AuthConfig {
      email:         config.admin_email.clone(),
      password_hash: config.admin_password_hash.clone(),
    };
    Self {
      store:    Arc::new(store),
      blobs:    Arc::new(blobs),
      sessions: MemoryStore::default(),
      auth:     Arc::new(auth),
      config:   Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the site [`Router`].
pub fn router<S, B>(state: AppState<S, B>) -> Router
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  let api = gazette_api::api_router(state.store.clone());
  let media = ServeDir::new(&state.config.media_dir);
  let body_limit = state.config.max_upload_mb.saturating_mul(1024 * 1024);
  let sessions = auth::session_layer(
    state.sessions.clone(),
    state.config.session_ttl(),
    state.config.secure_cookies(),
  );

  Router::new()
    .route("/",                get(home::handler::<S, B>))
    .route("/archive",         get(archive::handler::<S, B>))
    .route("/newspaper/{date}", get(issue::handler::<S, B>))
    .route(ADMIN_PATH,         get(admin::panel::<S, B>))
    .route(LOGIN_PATH,         get(login::form::<S, B>).post(login::submit::<S, B>))
    .route("/admin/logout",    post(login::logout))
    .route("/admin/upload",    post(admin::upload::<S, B>))
    .route("/admin/delete",    post(admin::delete::<S, B>))
    .layer(sessions)
    .with_state(state)
    .nest("/api", api)
    .nest_service(MEDIA_PATH, media)
    .layer(DefaultBodyLimit::max(body_limit))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
