//! Core types for the rolodex contact book: validated fields, contact records
//! and the in-memory [`AddressBook`].
//!
//! This crate has no I/O. Persistence is provided by `rolodex-store-sqlite`.

pub mod book;
pub mod error;
pub mod field;
pub mod record;

pub use book::{AddressBook, DEFAULT_BATCH_SIZE};
pub use error::{Error, Result};
pub use field::{Birthday, Name, Phone};
pub use record::Record;
