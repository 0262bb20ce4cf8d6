//! Admin workflows: publish pages for a date, and delete a date's issue.
//!
//! Uploads run one file at a time so the first storage failure stops the
//! batch. Nothing is rolled back: files stored before a failure stay in the
//! bucket, and a record deletion stands even if its folder cannot be removed.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
  blob::{BlobPath, BlobStore},
  issue::{Issue, IssueDate},
  store::IssueStore,
  upload::{UploadFile, UploadZone},
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PublishError {
  /// Input rejected before any side effect.
  #[error("{0}")]
  Validation(String),

  /// A destructive action was requested without confirmation.
  #[error("deleting the issue for {0} requires confirmation")]
  ConfirmationRequired(IssueDate),

  #[error("Failed to upload {file}: {source}")]
  Upload {
    file:   String,
    #[source]
    source: BoxError,
  },

  #[error("{0}")]
  Store(#[source] BoxError),
}

impl PublishError {
  fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self { Self::Store(Box::new(e)) }
}

// ─── Form state ──────────────────────────────────────────────────────────────

/// The upload form as the administrator filled it in.
#[derive(Debug, Clone, Default)]
pub struct AdminForm {
  pub title: String,
  /// Raw date input; validated on submit.
  pub date:  String,
  pub files: Vec<UploadFile>,
}

impl AdminForm {
  /// An empty form dated `today`.
  pub fn new(today: IssueDate) -> Self {
    Self { title: String::new(), date: today.to_string(), files: Vec::new() }
  }

  /// Queue files through the upload zone; non-images are dropped.
  pub fn add_files(&mut self, zone: &UploadZone, files: Vec<UploadFile>) {
    zone.select(files, |images| self.files.extend(images));
  }

  /// Remove one pending file. Out-of-range indices are ignored.
  pub fn remove_file(&mut self, index: usize) -> Option<UploadFile> {
    (index < self.files.len()).then(|| self.files.remove(index))
  }

  /// Clear title and files and move the date back to `today`.
  pub fn reset(&mut self, today: IssueDate) { *self = Self::new(today); }

  /// Publish the form; on success the form is reset for the next edition.
  pub async fn submit<S, B>(
    &mut self,
    store: &S,
    blobs: &B,
    now: DateTime<Utc>,
    today: IssueDate,
  ) -> Result<UploadReport, PublishError>
  where
    S: IssueStore,
    B: BlobStore,
  {
    if self.title.trim().is_empty() {
      return Err(PublishError::Validation("Please enter a newspaper title".into()));
    }
    let date = IssueDate::parse(self.date.trim())
      .map_err(|_| PublishError::Validation("Please choose a valid publication date".into()))?;

    let report = publish(store, blobs, &self.title, date, &self.files, now).await?;
    self.reset(today);
    Ok(report)
  }
}

// ─── Publish ─────────────────────────────────────────────────────────────────

/// Outcome of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadReport {
  pub date:     IssueDate,
  pub uploaded: usize,
  /// `true` when this upload created the issue, `false` when it appended.
  pub created:  bool,
  pub issue:    Issue,
}

impl UploadReport {
  pub fn message(&self) -> String {
    format!("Successfully uploaded {} image(s) for {}", self.uploaded, self.date)
  }
}

/// Upload `files` for `date`, then create the issue or append to it.
///
/// An existing issue keeps its pages; the new ones follow in upload order and
/// the title is replaced.
pub async fn publish<S, B>(
  store: &S,
  blobs: &B,
  title: &str,
  date: IssueDate,
  files: &[UploadFile],
  now: DateTime<Utc>,
) -> Result<UploadReport, PublishError>
where
  S: IssueStore,
  B: BlobStore,
{
  if title.trim().is_empty() {
    return Err(PublishError::Validation("Please enter a newspaper title".into()));
  }
  if files.is_empty() {
    return Err(PublishError::Validation("Please select at least one image".into()));
  }

  let millis = now.timestamp_millis();
  let mut urls = Vec::with_capacity(files.len());
  for (index, file) in files.iter().enumerate() {
    let path = BlobPath::page_object(date, index, millis, file.extension());
    let url = blobs
      .upload(&path, &file.content_type, file.bytes.clone())
      .await
      .map_err(|e| PublishError::Upload { file: file.name.clone(), source: Box::new(e) })?;
    tracing::debug!(%path, %url, "stored page");
    urls.push(url);
  }

  let existing = store.get_issue(date).await.map_err(PublishError::store)?;
  let created = existing.is_none();
  let issue = match existing {
    None => store
      .insert_issue(Issue::new(date, title, urls))
      .await
      .map_err(PublishError::store)?,
    Some(current) => {
      let mut image_urls = current.image_urls;
      image_urls.extend(urls);
      store
        .update_issue(date, title.to_owned(), image_urls)
        .await
        .map_err(PublishError::store)?
    }
  };

  tracing::info!(%date, uploaded = files.len(), created, pages = issue.page_count(), "published issue");
  Ok(UploadReport { date, uploaded: files.len(), created, issue })
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// What happened to the stored folder of a deleted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCleanup {
  Removed(usize),
  Failed(String),
}

/// Outcome of a delete. The record deletion and the folder removal are
/// reported separately.
#[derive(Debug, Clone)]
pub struct DeleteReport {
  pub date:           IssueDate,
  pub record_removed: bool,
  pub files:          FileCleanup,
}

impl DeleteReport {
  /// Whether stored files may have been left behind.
  pub fn has_orphans(&self) -> bool { matches!(self.files, FileCleanup::Failed(_)) }

  pub fn message(&self) -> String {
    let record = if self.record_removed {
      format!("Deleted the issue for {}", self.date)
    } else {
      format!("No issue was recorded for {}", self.date)
    };
    match &self.files {
      FileCleanup::Removed(n) => format!("{record}; removed {n} stored file(s)"),
      FileCleanup::Failed(e) => {
        format!("{record}, but its stored files could not be removed: {e}")
      }
    }
  }
}

/// Delete the issue for `date` and then its stored folder. Irreversible.
pub async fn delete<S, B>(
  store: &S,
  blobs: &B,
  date: &str,
  confirmed: bool,
) -> Result<DeleteReport, PublishError>
where
  S: IssueStore,
  B: BlobStore,
{
  let date = date.trim();
  if date.is_empty() {
    return Err(PublishError::Validation("Please choose a date to delete".into()));
  }
  let date = IssueDate::parse(date)
    .map_err(|_| PublishError::Validation(format!("Invalid date {date:?}")))?;
  if !confirmed {
    return Err(PublishError::ConfirmationRequired(date));
  }

  let record_removed = store.delete_issue(date).await.map_err(PublishError::store)?;

  let folder = BlobPath::issue_folder(date);
  let files = match blobs.remove_prefix(&folder).await {
    Ok(n) => FileCleanup::Removed(n),
    Err(e) => {
      tracing::warn!(%date, error = %e, "stored files for deleted issue were not removed");
      FileCleanup::Failed(e.to_string())
    }
  };

  tracing::info!(%date, record_removed, "deleted issue");
  Ok(DeleteReport { date, record_removed, files })
}
