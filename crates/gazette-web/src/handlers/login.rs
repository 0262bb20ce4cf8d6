//! Admin sign-in and sign-out.

use axum::{
  Form,
  extract::State,
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
};
use gazette_core::{blob::BlobStore, store::IssueStore};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
  ADMIN_PATH, AppState, LOGIN_PATH,
  auth::{self, verify_credentials},
  error::Error,
  html::{Flash, Page},
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
}

/// GET /admin/login. A visitor who is already signed in goes straight to
/// the panel.
pub async fn form<S, B>(
  State(state): State<AppState<S, B>>,
  session: Session,
) -> Result<Response, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  if auth::signed_in(&session).await? {
    return Ok(Redirect::to(ADMIN_PATH).into_response());
  }
  Ok(Html(login_page(&state.config.site_title, "", None)?).into_response())
}

/// POST /admin/login
pub async fn submit<S, B>(
  State(state): State<AppState<S, B>>,
  session: Session,
  Form(form): Form<LoginForm>,
) -> Result<Response, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  if verify_credentials(&form.email, &form.password, &state.auth).is_err() {
    tracing::warn!(email = %form.email, "rejected admin sign-in");
    let flash = Flash::Error("Invalid email or password".to_string());
    let body = login_page(&state.config.site_title, &form.email, Some(&flash))?;
    return Ok((StatusCode::UNAUTHORIZED, Html(body)).into_response());
  }

  auth::sign_in(&session, &form.email).await?;
  tracing::info!(email = %form.email, "admin signed in");
  Ok(Redirect::to(ADMIN_PATH).into_response())
}

/// POST /admin/logout. Succeeds even without a live session.
pub async fn logout(session: Session) -> Result<Redirect, Error> {
  auth::sign_out(&session).await?;
  Ok(Redirect::to("/"))
}

fn login_page(site_title: &str, email: &str, flash: Option<&Flash>) -> Result<String, Error> {
  let mut page = Page::new(&format!("Admin Login | {site_title}"))?;
  page.site_header(site_title)?;
  page.element("h2", &[], "Admin Login")?;
  if let Some(flash) = flash {
    page.notice(flash)?;
  }

  page.open("form", &[("method", "post"), ("action", LOGIN_PATH), ("class", "stacked")])?;
  page.open("label", &[])?.text("Email")?;
  page.void("input", &[
    ("type", "email"),
    ("name", "email"),
    ("value", email),
    ("autocomplete", "username"),
    ("required", "required"),
  ])?;
  page.close("label")?;
  page.open("label", &[])?.text("Password")?;
  page.void("input", &[
    ("type", "password"),
    ("name", "password"),
    ("autocomplete", "current-password"),
    ("required", "required"),
  ])?;
  page.close("label")?;
  page.element("button", &[("type", "submit"), ("class", "button")], "Sign In")?;
  page.close("form")?;

  page.site_footer(site_title)?;
  page.finish()
}
