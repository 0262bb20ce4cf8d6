//! Handlers for `/issues` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/issues/latest` | 404 when nothing is published |
//! | `GET`  | `/issues/:date` | `YYYY-MM-DD`; 404 if malformed or unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use gazette_core::{
  issue::{Issue, IssueDate},
  store::IssueStore,
};

use crate::error::ApiError;

/// `GET /issues/latest`
pub async fn latest<S>(State(store): State<Arc<S>>) -> Result<Json<Issue>, ApiError>
where
  S: IssueStore,
{
  let issue = store
    .latest()
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NothingPublished)?;
  Ok(Json(issue))
}

/// `GET /issues/:date`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(date): Path<String>,
) -> Result<Json<Issue>, ApiError>
where
  S: IssueStore,
{
  // A malformed date is indistinguishable from an unknown one.
  let date = IssueDate::parse(&date).map_err(|_| ApiError::MalformedDate(date))?;
  let issue = store
    .get_issue(date)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::IssueNotFound(date))?;
  Ok(Json(issue))
}
