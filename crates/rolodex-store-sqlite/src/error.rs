//! Error type for `rolodex-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A stored row no longer satisfies the record rules.
  #[error("core error: {0}")]
  Core(#[from] rolodex_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The file is a SQLite database that rolodex did not write.
  #[error("{} is not a rolodex address book", .0.display())]
  ForeignFile(std::path::PathBuf),

  #[error("unsupported book format version {0}")]
  UnsupportedVersion(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
