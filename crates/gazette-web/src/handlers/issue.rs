//! GET /newspaper/{date}: one issue by publication date.

use axum::{
  extract::{Path, Query, State},
  response::Html,
};
use gazette_core::{blob::BlobStore, issue::IssueDate, store::IssueStore};

use crate::{AppState, error::Error, gallery::ViewQuery, handlers::issue_page};

pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  Path(date): Path<String>,
  Query(query): Query<ViewQuery>,
) -> Result<Html<String>, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  // Malformed or impossible dates never reach the store.
  let date = IssueDate::parse(&date).map_err(|_| Error::NotFound)?;

  let issue = state.store
    .get_issue(date)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  let base = format!("/newspaper/{date}");
  Ok(Html(issue_page(&state.config, &issue, &base, &query)?))
}
