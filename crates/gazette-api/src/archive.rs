//! Handler for `GET /archive`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use gazette_core::{
  issue::{IssueDate, IssueSummary, cutoff},
  store::IssueStore,
};
use serde::Deserialize;

use crate::{DEFAULT_ARCHIVE_DAYS, error::ApiError};

/// Longest window the API will scan.
const MAX_ARCHIVE_DAYS: u32 = 3660;

#[derive(Debug, Deserialize, Default)]
pub struct ArchiveParams {
  /// Window length in days, counted back from today.
  pub days: Option<u32>,
}

/// `GET /archive[?days=N]`, newest first.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ArchiveParams>,
) -> Result<Json<Vec<IssueSummary>>, ApiError>
where
  S: IssueStore,
{
  let days = params.days.unwrap_or(DEFAULT_ARCHIVE_DAYS);
  if days > MAX_ARCHIVE_DAYS {
    return Err(ApiError::WindowTooLong(MAX_ARCHIVE_DAYS));
  }

  let issues = store
    .archive(cutoff(IssueDate::today(), days))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(issues))
}
