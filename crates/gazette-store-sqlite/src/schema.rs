//! SQL schema for the Gazette SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per publication date. Dates are stored as YYYY-MM-DD text, so
-- lexical order is chronological order.
CREATE TABLE IF NOT EXISTS newspapers (
    date        TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    image_urls  TEXT NOT NULL DEFAULT '[]'   -- JSON array, page order
);

PRAGMA user_version = 1;
";
