//! Error types for `rolodex-core`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A value failed the validation rule of the named field.
  #[error("invalid {field}: {value:?}")]
  Validation { field: &'static str, value: String },

  #[error("contact name must not be empty")]
  EmptyName,

  #[error("phone number {0} already exists")]
  DuplicatePhone(String),

  #[error("phone number {0} not found")]
  PhoneNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
