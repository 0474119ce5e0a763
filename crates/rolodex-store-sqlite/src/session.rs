//! [`Session`] — one load-to-save lifecycle of a book file.
//!
//! Opening a session loads the book. The book is written back when the
//! session is closed, or when it is dropped without being closed (early
//! return, `?` propagation, panic unwind).

use std::{
  ops::{Deref, DerefMut},
  path::{Path, PathBuf},
};

use rolodex_core::AddressBook;

use crate::{Result, store::Persist};

/// Book file used when no path is configured, relative to the working
/// directory.
pub const DEFAULT_BOOK_PATH: &str = "address_book.db";

#[derive(Debug)]
pub struct Session {
  book:    AddressBook,
  path:    PathBuf,
  /// Cleared once the final save has been attempted.
  pending: bool,
}

impl Session {
  /// Load the book at `path` (empty if the file does not exist).
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let mut book = AddressBook::new();
    book.load(&path)?;
    tracing::info!(path = %path.display(), records = book.len(), "session opened");
    Ok(Self { book, path, pending: true })
  }

  /// [`Session::open`] on [`DEFAULT_BOOK_PATH`].
  pub fn open_default() -> Result<Self> { Self::open(DEFAULT_BOOK_PATH) }

  pub fn path(&self) -> &Path { &self.path }

  /// Write the book now without ending the session.
  pub fn checkpoint(&self) -> Result<()> { self.book.save(&self.path) }

  /// Save and end the session, reporting any save error to the caller.
  pub fn close(mut self) -> Result<()> {
    self.pending = false;
    self.book.save(&self.path)?;
    tracing::info!(path = %self.path.display(), records = self.book.len(), "session closed");
    Ok(())
  }
}

impl Deref for Session {
  type Target = AddressBook;

  fn deref(&self) -> &AddressBook { &self.book }
}

impl DerefMut for Session {
  fn deref_mut(&mut self) -> &mut AddressBook { &mut self.book }
}

impl Drop for Session {
  fn drop(&mut self) {
    if !self.pending {
      return;
    }
    match self.book.save(&self.path) {
      Ok(()) => tracing::info!(path = %self.path.display(), "session saved on drop"),
      Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to save session"),
    }
  }
}
