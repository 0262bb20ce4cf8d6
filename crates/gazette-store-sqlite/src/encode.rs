//! Conversions between domain types and the plain-text SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`; page lists as compact JSON arrays.

use gazette_core::issue::{Issue, IssueDate, IssueSummary};

use crate::Result;

pub fn encode_date(date: IssueDate) -> String { date.to_string() }

pub fn decode_date(s: &str) -> Result<IssueDate> { Ok(IssueDate::parse(s)?) }

pub fn encode_urls(urls: &[String]) -> Result<String> { Ok(serde_json::to_string(urls)?) }

pub fn decode_urls(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `newspapers` row.
pub struct RawIssue {
  pub date:       String,
  pub title:      String,
  pub image_urls: String,
}

impl RawIssue {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      date:       row.get(0)?,
      title:      row.get(1)?,
      image_urls: row.get(2)?,
    })
  }

  pub fn into_issue(self) -> Result<Issue> {
    Ok(Issue {
      date:       decode_date(&self.date)?,
      title:      self.title,
      image_urls: decode_urls(&self.image_urls)?,
    })
  }
}

/// Raw strings for the archive projection.
pub struct RawSummary {
  pub date:  String,
  pub title: String,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<IssueSummary> {
    Ok(IssueSummary { date: decode_date(&self.date)?, title: self.title })
  }
}
