//! The `IssueStore` trait.
//!
//! Implemented by storage backends (e.g. `gazette-store-sqlite`). The web
//! server, the JSON API and the publish workflow depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::issue::{Issue, IssueDate, IssueSummary};

/// Persistence for the single `newspapers` entity, keyed by date.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait IssueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The most recent issue by date, or `None` if there are none.
  fn latest(
    &self,
  ) -> impl Future<Output = Result<Option<Issue>, Self::Error>> + Send + '_;

  /// Exact lookup by date.
  fn get_issue(
    &self,
    date: IssueDate,
  ) -> impl Future<Output = Result<Option<Issue>, Self::Error>> + Send + '_;

  /// Summaries of every issue dated on or after `since`, newest first.
  fn archive(
    &self,
    since: IssueDate,
  ) -> impl Future<Output = Result<Vec<IssueSummary>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new issue. Fails if an issue already exists for its date.
  fn insert_issue(
    &self,
    issue: Issue,
  ) -> impl Future<Output = Result<Issue, Self::Error>> + Send + '_;

  /// Replace the title and page list of an existing issue. Fails if there
  /// is no issue for `date`.
  fn update_issue(
    &self,
    date: IssueDate,
    title: String,
    image_urls: Vec<String>,
  ) -> impl Future<Output = Result<Issue, Self::Error>> + Send + '_;

  /// Remove the issue for `date`. Returns whether a record existed.
  fn delete_issue(
    &self,
    date: IssueDate,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove every issue dated strictly before `cutoff` and return the
  /// purged dates in ascending order.
  fn purge_before(
    &self,
    cutoff: IssueDate,
  ) -> impl Future<Output = Result<Vec<IssueDate>, Self::Error>> + Send + '_;
}
