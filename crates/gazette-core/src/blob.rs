//! Blob storage for page images.
//!
//! The bucket holds objects under `newspapers/<date>/<file>`. Backends only
//! need to store bytes at a path, hand back a public URL, and remove a folder.

use std::{fmt, future::Future};

use bytes::Bytes;

use crate::{Result, issue::IssueDate};

/// Top-level folder of the page-image bucket.
pub const ISSUE_ROOT: &str = "newspapers";

// ─── BlobPath ────────────────────────────────────────────────────────────────

/// A relative, `/`-separated object path.
///
/// Paths are only built from an [`IssueDate`], a page number, a timestamp
/// and an extension, so no segment is ever empty, `.` or `..` and a path
/// can never escape the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobPath(String);

impl BlobPath {
  /// The folder holding every page of the issue for `date`.
  pub fn issue_folder(date: IssueDate) -> Self {
    Self(format!("{ISSUE_ROOT}/{date}"))
  }

  /// Object path for page `index` (0-based) of an upload batch.
  ///
  /// The 1-based page number and the batch timestamp keep names unique
  /// across batches uploaded to the same date.
  pub fn page_object(date: IssueDate, index: usize, millis: i64, ext: &str) -> Self {
    Self(format!("{ISSUE_ROOT}/{date}/{date}_{}_{millis}.{ext}", index + 1))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn segments(&self) -> impl Iterator<Item = &str> { self.0.split('/') }
}

impl fmt::Display for BlobPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a page-image bucket.
pub trait BlobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store `bytes` at `path` and return its publicly addressable URL.
  ///
  /// Objects are write-once: uploading to an existing path fails.
  fn upload<'a>(
    &'a self,
    path: &'a BlobPath,
    content_type: &'a str,
    bytes: Bytes,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Remove every object under `prefix` and return how many were removed.
  /// A prefix with no objects removes nothing and succeeds.
  fn remove_prefix<'a>(
    &'a self,
    prefix: &'a BlobPath,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
