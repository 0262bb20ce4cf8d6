//! [`SqliteStore`]: the SQLite implementation of [`IssueStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use gazette_core::{
  issue::{Issue, IssueDate, IssueSummary},
  store::IssueStore,
};

use crate::{
  encode::{decode_date, encode_date, encode_urls, RawIssue, RawSummary},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Gazette issue store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── IssueStore impl ─────────────────────────────────────────────────────────

impl IssueStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn latest(&self) -> Result<Option<Issue>> {
    let raw: Option<RawIssue> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT date, title, image_urls FROM newspapers ORDER BY date DESC LIMIT 1",
            [],
            RawIssue::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIssue::into_issue).transpose()
  }

  async fn get_issue(&self, date: IssueDate) -> Result<Option<Issue>> {
    let date_str = encode_date(date);

    let raw: Option<RawIssue> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT date, title, image_urls FROM newspapers WHERE date = ?1",
            rusqlite::params![date_str],
            RawIssue::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIssue::into_issue).transpose()
  }

  async fn archive(&self, since: IssueDate) -> Result<Vec<IssueSummary>> {
    let since_str = encode_date(since);

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT date, title FROM newspapers WHERE date >= ?1 ORDER BY date DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![since_str], |row| {
            Ok(RawSummary { date: row.get(0)?, title: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_issue(&self, issue: Issue) -> Result<Issue> {
    let date_str  = encode_date(issue.date);
    let title     = issue.title.clone();
    let urls_json = encode_urls(&issue.image_urls)?;

    let inserted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT INTO newspapers (date, title, image_urls) VALUES (?1, ?2, ?3)
           ON CONFLICT(date) DO NOTHING",
          rusqlite::params![date_str, title, urls_json],
        )?;
        Ok(changed == 1)
      })
      .await?;

    if !inserted {
      return Err(Error::AlreadyExists(issue.date));
    }
    tracing::debug!(date = %issue.date, pages = issue.page_count(), "inserted issue");
    Ok(issue)
  }

  async fn update_issue(
    &self,
    date:       IssueDate,
    title:      String,
    image_urls: Vec<String>,
  ) -> Result<Issue> {
    let date_str  = encode_date(date);
    let urls_json = encode_urls(&image_urls)?;
    let title_col = title.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE newspapers SET title = ?2, image_urls = ?3 WHERE date = ?1",
          rusqlite::params![date_str, title_col, urls_json],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::IssueNotFound(date));
    }
    tracing::debug!(%date, pages = image_urls.len(), "updated issue");
    Ok(Issue { date, title, image_urls })
  }

  async fn delete_issue(&self, date: IssueDate) -> Result<bool> {
    let date_str = encode_date(date);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM newspapers WHERE date = ?1",
          rusqlite::params![date_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn purge_before(&self, cutoff: IssueDate) -> Result<Vec<IssueDate>> {
    let cutoff_str = encode_date(cutoff);

    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("DELETE FROM newspapers WHERE date < ?1 RETURNING date")?;
        let rows = stmt
          .query_map(rusqlite::params![cutoff_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    let mut dates = raws
      .iter()
      .map(|s| decode_date(s))
      .collect::<Result<Vec<_>>>()?;
    dates.sort();
    Ok(dates)
  }
}
