//! JSON read API for Gazette.
//!
//! Exposes an axum [`Router`] backed by any [`gazette_core::store::IssueStore`].
//! Every endpoint is public and read-only; writes go through the admin panel.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gazette_api::api_router(store.clone()))
//! ```

pub mod archive;
pub mod error;
pub mod issues;

use std::sync::Arc;

use axum::{Router, routing::get};
use gazette_core::store::IssueStore;

pub use error::ApiError;

/// Default archive window, in days.
pub const DEFAULT_ARCHIVE_DAYS: u32 = 30;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router that has
/// already been given its own state.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: IssueStore + 'static,
{
  Router::new()
    .route("/issues/latest", get(issues::latest::<S>))
    .route("/issues/{date}", get(issues::get_one::<S>))
    .route("/archive", get(archive::handler::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use gazette_core::issue::{Issue, IssueDate, IssueSummary};
  use gazette_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn seeded() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let today = IssueDate::today();
    for (days, title) in [(0, "Today"), (3, "Three days ago"), (45, "Long ago")] {
      store
        .insert_issue(Issue::new(
          today.days_before(days),
          title,
          vec![format!("https://cdn.test/{days}.jpg")],
        ))
        .await
        .unwrap();
    }
    Arc::new(store)
  }

  // A store whose database is unreachable.
  struct Unavailable;

  #[derive(Debug, thiserror::Error)]
  #[error("database is locked")]
  struct Locked;

  impl IssueStore for Unavailable {
    type Error = Locked;
    async fn latest(&self) -> Result<Option<Issue>, Locked> { Err(Locked) }
    async fn get_issue(&self, _: IssueDate) -> Result<Option<Issue>, Locked> { Err(Locked) }
    async fn archive(&self, _: IssueDate) -> Result<Vec<IssueSummary>, Locked> { Err(Locked) }
    async fn insert_issue(&self, _: Issue) -> Result<Issue, Locked> { Err(Locked) }
    async fn update_issue(&self, _: IssueDate, _: String, _: Vec<String>) -> Result<Issue, Locked> { Err(Locked) }
    async fn delete_issue(&self, _: IssueDate) -> Result<bool, Locked> { Err(Locked) }
    async fn purge_before(&self, _: IssueDate) -> Result<Vec<IssueDate>, Locked> { Err(Locked) }
  }

  async fn get_json<S>(store: Arc<S>, uri: &str) -> (StatusCode, serde_json::Value)
  where
    S: IssueStore + 'static,
  {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn latest_returns_newest_issue() {
    let (status, body) = get_json(seeded().await, "/issues/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Today");
    assert_eq!(body["image_urls"][0], "https://cdn.test/0.jpg");
  }

  #[tokio::test]
  async fn latest_on_empty_store_is_404() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let (status, body) = get_json(store, "/issues/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn malformed_date_is_404() {
    let (status, body) = get_json(seeded().await, "/issues/2025-13-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no issue was published on \"2025-13-1\"");
  }

  #[tokio::test]
  async fn unknown_date_names_the_date() {
    let (status, body) = get_json(seeded().await, "/issues/2001-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no issue was published on 2001-01-01");
  }

  #[tokio::test]
  async fn store_failures_are_500_with_message() {
    for uri in ["/issues/latest", "/issues/2025-11-08", "/archive"] {
      let (status, body) = get_json(Arc::new(Unavailable), uri).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
      assert_eq!(body["error"], "store error: database is locked", "{uri}");
    }
  }

  #[tokio::test]
  async fn oversized_archive_window_is_rejected() {
    let (status, body) = get_json(seeded().await, "/archive?days=5000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "days may not exceed 3660");
  }

  #[tokio::test]
  async fn issue_by_date() {
    let date = IssueDate::today().days_before(3);
    let (status, body) = get_json(seeded().await, &format!("/issues/{date}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], date.to_string());
    assert_eq!(body["title"], "Three days ago");
  }

  #[tokio::test]
  async fn archive_defaults_to_thirty_days() {
    let (status, body) = get_json(seeded().await, "/archive").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|i| i["title"].as_str().unwrap())
      .collect();
    assert_eq!(titles, ["Today", "Three days ago"]);
  }

  #[tokio::test]
  async fn archive_window_is_configurable() {
    let (_, body) = get_json(seeded().await, "/archive?days=60").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
  }
}
