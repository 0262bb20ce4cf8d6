//! Core types and trait definitions for Gazette.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the issue model, the storage traits the backends implement, the page viewer
//! state machine, the upload filter, and the admin publish/delete workflow.

// Native `async fn` in traits; the `Send` bounds are spelled out on the
// returned futures instead.
#![allow(async_fn_in_trait)]

pub mod blob;
pub mod error;
pub mod issue;
pub mod publish;
pub mod store;
pub mod upload;
pub mod viewer;

pub use error::{Error, Result};
