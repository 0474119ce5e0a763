//! SQL schema for the rolodex book file.
//!
//! A book file holds exactly one snapshot. `PRAGMA user_version` records the
//! layout; `0` means the file was never written by rolodex.

/// Layout version written by this crate.
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    position  INTEGER PRIMARY KEY,   -- insertion order within the book
    name      TEXT NOT NULL UNIQUE,
    phones    TEXT NOT NULL DEFAULT '[]',  -- JSON array, in record order
    birthday  TEXT                   -- YYYY-MM-DD or NULL
);

PRAGMA user_version = 1;
";
