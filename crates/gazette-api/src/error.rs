//! Errors returned by the read API, rendered as `{"error": "..."}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use gazette_core::issue::IssueDate;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("no issue has been published")]
  NothingPublished,

  #[error("no issue was published on {0}")]
  IssueNotFound(IssueDate),

  /// The path segment is not a `YYYY-MM-DD` calendar date. Answered like an
  /// unknown issue.
  #[error("no issue was published on {0:?}")]
  MalformedDate(String),

  #[error("days may not exceed {0}")]
  WindowTooLong(u32),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NothingPublished
      | ApiError::IssueNotFound(_)
      | ApiError::MalformedDate(_) => StatusCode::NOT_FOUND,
      ApiError::WindowTooLong(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let ApiError::Store(e) = &self {
      tracing::error!(error = %e, "api store error");
    }
    (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}
