//! Administrator sign-in: credential check, the cookie session layer, and
//! the [`Authenticated`] extractor guarding the admin routes.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, cookie::SameSite};

use crate::{ADMIN_PATH, error::Error};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "gazette_session";

/// Session key holding the signed-in administrator's email.
const ADMIN_KEY: &str = "admin";

/// Credentials accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub email:         String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Zero-size marker: present in the handler means the request carried a
/// signed-in session.
pub struct Authenticated;

/// Check an email/password pair. Email comparison ignores case and
/// surrounding whitespace.
pub fn verify_credentials(email: &str, password: &str, config: &AuthConfig) -> Result<(), Error> {
  if !email.trim().eq_ignore_ascii_case(config.email.trim()) {
    return Err(Error::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(())
}

// ─── Sessions ────────────────────────────────────────────────────────────────

/// Cookie sessions scoped to the admin panel.
///
/// Sessions live in `store` and lapse after `ttl` without a request.
/// `secure` marks the cookie HTTPS-only.
pub fn session_layer(
  store:  MemoryStore,
  ttl:    time::Duration,
  secure: bool,
) -> SessionManagerLayer<MemoryStore> {
  SessionManagerLayer::new(store)
    .with_name(SESSION_COOKIE)
    .with_path(ADMIN_PATH)
    .with_http_only(true)
    .with_same_site(SameSite::Lax)
    .with_secure(secure)
    .with_expiry(Expiry::OnInactivity(ttl))
}

/// Mark `session` as signed in, under a fresh id.
pub async fn sign_in(session: &Session, email: &str) -> Result<(), Error> {
  session.cycle_id().await.map_err(Error::session)?;
  session.insert(ADMIN_KEY, email.trim()).await.map_err(Error::session)
}

pub async fn signed_in(session: &Session) -> Result<bool, Error> {
  let email = session.get::<String>(ADMIN_KEY).await.map_err(Error::session)?;
  Ok(email.is_some())
}

/// Delete the session and its cookie.
pub async fn sign_out(session: &Session) -> Result<(), Error> {
  session.flush().await.map_err(Error::session)
}

impl<S> FromRequestParts<S> for Authenticated
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let session = parts
      .extensions
      .get::<Session>()
      .cloned()
      .ok_or_else(|| Error::Session("session layer is not installed".to_string()))?;
    if signed_in(&session).await? {
      Ok(Authenticated)
    } else {
      Err(Error::Unauthorized)
    }
  }
}
