//! Error type for `gazette-storage-fs`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("object already exists: {0}")]
  AlreadyExists(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
