//! Error types and axum `IntoResponse` implementation.

use axum::{
  extract::multipart::MultipartError,
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::{LOGIN_PATH, html};

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error("not found")]
  NotFound,
  #[error("render error: {0}")]
  Render(String),
  #[error("multipart error: {0}")]
  Multipart(#[from] MultipartError),
  #[error("session error: {0}")]
  Session(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn session(e: impl std::fmt::Display) -> Self {
    Self::Session(e.to_string())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      // Protected pages send the visitor to the login form.
      Error::Unauthorized => Redirect::to(LOGIN_PATH).into_response(),
      Error::NotFound => (
        StatusCode::NOT_FOUND,
        Html(html::message_page(
          "Not Found",
          "The page you are looking for does not exist.",
        )),
      )
        .into_response(),
      // Oversized bodies answer 413, malformed ones 400.
      Error::Multipart(e) => (e.status(), e.body_text()).into_response(),
      Error::Session(msg) => {
        tracing::error!(error = %msg, "session error");
        (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
      }
      Error::Render(msg) => {
        tracing::error!(error = %msg, "failed to render page");
        (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store error");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
