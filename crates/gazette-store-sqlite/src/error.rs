//! Error type for `gazette-store-sqlite`.

use gazette_core::issue::IssueDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] gazette_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("an issue already exists for {0}")]
  AlreadyExists(IssueDate),

  #[error("no issue exists for {0}")]
  IssueNotFound(IssueDate),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
