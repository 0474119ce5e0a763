//! Runtime settings, layered as: defaults, optional TOML file, `ROLODEX_*`
//! environment variables, command-line flags.

use std::{
  num::NonZeroUsize,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use rolodex_core::DEFAULT_BATCH_SIZE;
use rolodex_store_sqlite::DEFAULT_BOOK_PATH;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  /// Book file loaded at startup and saved on exit.
  pub book_path:  PathBuf,
  /// Records per group in `show all`.
  pub batch_size: NonZeroUsize,
  /// Default tracing directive when `RUST_LOG` is unset.
  pub log_level:  String,
}

impl Settings {
  pub fn load(file: Option<&Path>, book: Option<&Path>) -> anyhow::Result<Self> {
    Self::load_with_env(file, book, None)
  }

  /// [`Settings::load`] reading `ROLODEX_*` variables from `env` instead of
  /// the process environment when it is `Some`.
  fn load_with_env(
    file: Option<&Path>,
    book: Option<&Path>,
    env: Option<config::Map<String, String>>,
  ) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("book_path", DEFAULT_BOOK_PATH)?
      .set_default("batch_size", DEFAULT_BATCH_SIZE.get() as u64)?
      .set_default("log_level", "warn")?;

    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder.add_source(
      config::Environment::with_prefix("ROLODEX")
        .try_parsing(true)
        .source(env),
    );
    if let Some(book) = book {
      builder = builder.set_override("book_path", book.to_string_lossy().into_owned())?;
    }

    builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}
