//! [`FsBlobStore`]: the filesystem implementation of [`BlobStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use bytes::Bytes;
use gazette_core::blob::{BlobPath, BlobStore};
use tokio::{fs, io::AsyncWriteExt as _};

use crate::{Error, Result};

/// A bucket rooted at a local directory.
///
/// Public URLs are `<public_base>/<path>`; serving `root` at `public_base` is
/// the caller's job.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
  root:        PathBuf,
  public_base: String,
}

impl FsBlobStore {
  /// Open (or create) the bucket directory.
  pub async fn open(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Result<Self> {
    let root = root.into();
    fs::create_dir_all(&root).await?;
    Ok(Self {
      root,
      public_base: public_base.into().trim_end_matches('/').to_owned(),
    })
  }

  pub fn root(&self) -> &Path { &self.root }

  pub fn public_url(&self, path: &BlobPath) -> String {
    format!("{}/{}", self.public_base, path)
  }

  fn resolve(&self, path: &BlobPath) -> PathBuf {
    path.segments().fold(self.root.clone(), |acc, seg| acc.join(seg))
  }
}

impl BlobStore for FsBlobStore {
  type Error = Error;

  async fn upload(&self, path: &BlobPath, content_type: &str, bytes: Bytes) -> Result<String> {
    let target = self.resolve(path);
    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent).await?;
    }

    let mut file = fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&target)
      .await
      .map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => Error::AlreadyExists(path.to_string()),
        _ => Error::Io(e),
      })?;
    file.write_all(&bytes).await?;
    file.flush().await?;

    tracing::debug!(%path, content_type, size = bytes.len(), "stored object");
    Ok(self.public_url(path))
  }

  async fn remove_prefix(&self, prefix: &BlobPath) -> Result<usize> {
    let target = self.resolve(prefix);
    let meta = match fs::metadata(&target).await {
      Ok(meta) => meta,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
      Err(e) => return Err(e.into()),
    };

    if meta.is_file() {
      fs::remove_file(&target).await?;
      return Ok(1);
    }

    let count = count_files(&target).await?;
    fs::remove_dir_all(&target).await?;
    tracing::debug!(%prefix, count, "removed folder");
    Ok(count)
  }
}

/// Number of regular files below `dir`, recursively.
async fn count_files(dir: &Path) -> Result<usize> {
  let mut pending = vec![dir.to_path_buf()];
  let mut count = 0;
  while let Some(next) = pending.pop() {
    let mut entries = fs::read_dir(&next).await?;
    while let Some(entry) = entries.next_entry().await? {
      if entry.file_type().await?.is_dir() {
        pending.push(entry.path());
      } else {
        count += 1;
      }
    }
  }
  Ok(count)
}
