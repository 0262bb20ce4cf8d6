//! The issue: one day's edition, keyed by its publication date.

use std::{fmt, str::FromStr};

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── IssueDate ───────────────────────────────────────────────────────────────

/// A publication date. The only accepted text form is `YYYY-MM-DD`, and it
/// must name a real calendar day.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct IssueDate(NaiveDate);

impl IssueDate {
  pub fn parse(s: &str) -> Result<Self> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
      && bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
      });
    if !well_formed {
      return Err(Error::InvalidDate(s.to_owned()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self)
      .map_err(|_| Error::InvalidDate(s.to_owned()))
  }

  /// The current day in the server's local time zone.
  pub fn today() -> Self { Self(Local::now().date_naive()) }

  /// The date `days` calendar days earlier, saturating at the earliest
  /// representable date.
  pub fn days_before(self, days: u32) -> Self {
    Self(
      self
        .0
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN),
    )
  }

  /// Long human form, e.g. `Saturday, November 8, 2025`.
  pub fn long_display(self) -> String {
    self.0.format("%A, %B %-d, %Y").to_string()
  }
}

impl fmt::Display for IssueDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format("%Y-%m-%d"))
  }
}

impl FromStr for IssueDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for IssueDate {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<IssueDate> for String {
  fn from(date: IssueDate) -> Self { date.to_string() }
}

/// First date still inside a window of `days` days ending `today`.
///
/// Issues dated on or after the cutoff are retained by the archive; issues
/// strictly before it are eligible for purging.
pub fn cutoff(today: IssueDate, days: u32) -> IssueDate { today.days_before(days) }

// ─── Issue ───────────────────────────────────────────────────────────────────

/// One published edition. `image_urls` order is page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  pub date:       IssueDate,
  pub title:      String,
  pub image_urls: Vec<String>,
}

impl Issue {
  pub fn new(date: IssueDate, title: impl Into<String>, image_urls: Vec<String>) -> Self {
    Self { date, title: title.into(), image_urls }
  }

  pub fn page_count(&self) -> usize { self.image_urls.len() }

  pub fn summary(&self) -> IssueSummary {
    IssueSummary { date: self.date, title: self.title.clone() }
  }
}

/// The archive listing projection: date and title only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
  pub date:  IssueDate,
  pub title: String,
}
