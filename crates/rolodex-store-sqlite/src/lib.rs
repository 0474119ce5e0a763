//! SQLite persistence for rolodex address books.
//!
//! A book is stored as a single SQLite file holding one snapshot. Use
//! [`Persist`] for explicit save/load, or [`Session`] to tie a book to a file
//! for the duration of a scope.

mod encode;
mod schema;
mod session;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use session::{DEFAULT_BOOK_PATH, Session};
pub use store::Persist;

#[cfg(test)]
mod tests;
