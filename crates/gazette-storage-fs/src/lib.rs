//! Filesystem backend for the Gazette page-image bucket.
//!
//! Objects live under a root directory using their bucket path verbatim, so
//! the directory can be served read-only by any static file handler.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FsBlobStore;
