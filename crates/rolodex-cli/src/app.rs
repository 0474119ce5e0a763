//! Command dispatcher: applies parsed commands to an address book and turns
//! every outcome, including failures, into text for the user.

use std::num::NonZeroUsize;

use rolodex_core::{AddressBook, Record};
use thiserror::Error;

use crate::commands::{Command, InvalidCommand, USAGE};

// ─── Reply ────────────────────────────────────────────────────────────────────

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
  Continue(String),
  Exit(String),
}

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Failures of a well-formed command. Never leaves the dispatcher.
#[derive(Debug, Error)]
enum CommandError {
  #[error("Invalid command. Type `hello` for the list of commands.")]
  Invalid(#[from] InvalidCommand),

  #[error("Contact {0} already exists. Use `change` to replace it.")]
  AlreadyExists(String),

  #[error("Contact {0} not found.")]
  NotFound(String),

  #[error("{}", describe(.0))]
  Rejected(#[from] rolodex_core::Error),
}

fn describe(error: &rolodex_core::Error) -> String {
  use rolodex_core::Error;
  match error {
    Error::Validation { field: "phone", value } => {
      format!("Invalid command: phone number {value:?} must be exactly 10 digits.")
    }
    Error::Validation { field: "birthday", value } => {
      format!("Invalid command: birthday {value:?} must be a date in YYYY-MM-DD format.")
    }
    Error::Validation { field, value } => format!("Invalid command: bad {field} {value:?}."),
    Error::EmptyName => "Invalid command: a contact needs a name.".to_owned(),
    Error::DuplicatePhone(phone) => format!("Phone number {phone} is already on this contact."),
    Error::PhoneNotFound(phone) => format!("Phone number {phone} is not on this contact."),
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<'a> {
  book:       &'a mut AddressBook,
  /// Records per group in `show all`.
  batch_size: NonZeroUsize,
}

impl<'a> App<'a> {
  pub fn new(book: &'a mut AddressBook, batch_size: NonZeroUsize) -> Self {
    Self { book, batch_size }
  }

  /// Parse and run one input line.
  pub fn handle_line(&mut self, line: &str) -> Reply {
    let result = Command::parse(line)
      .map_err(CommandError::from)
      .and_then(|command| {
        tracing::debug!(?command, "dispatching");
        self.execute(command)
      });

    match result {
      Ok(reply) => reply,
      Err(e) => {
        tracing::debug!(error = ?e, "command failed");
        Reply::Continue(e.to_string())
      }
    }
  }

  fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
    let text = match command {
      Command::Hello => format!("How can I help you?\n{USAGE}"),

      Command::Add { name, phone, birthday } => {
        if self.book.contains(&name) {
          return Err(CommandError::AlreadyExists(name));
        }
        self.book.add_record(build_record(&name, &phone, birthday.as_deref())?);
        "Contact added.".to_owned()
      }

      Command::Change { name, phone, birthday } => {
        self.book.add_record(build_record(&name, &phone, birthday.as_deref())?);
        "Contact changed.".to_owned()
      }

      Command::AddPhone { name, phone } => {
        self.record_mut(&name)?.add_phone(&phone)?;
        "Phone added.".to_owned()
      }

      Command::EditPhone { name, old, new } => {
        self.record_mut(&name)?.edit_phone(&old, &new)?;
        "Phone changed.".to_owned()
      }

      Command::RemovePhone { name, phone } => {
        if self.record_mut(&name)?.remove_phone(&phone) {
          "Phone removed.".to_owned()
        } else {
          format!("{name} has no phone number {phone}.")
        }
      }

      Command::Phone { name } => {
        let record = self.record(&name)?;
        if record.phones().is_empty() {
          format!("{name} has no phone numbers.")
        } else {
          join_phones(record)
        }
      }

      Command::Birthday { name } => match self.record(&name)?.days_to_birthday() {
        Some(0) => format!("{name}'s birthday is today!"),
        Some(days) => format!("{days} days until {name}'s birthday."),
        None => format!("{name} has no birthday set."),
      },

      Command::Delete { name } => match self.book.delete(&name) {
        Some(_) => "Contact deleted.".to_owned(),
        None => return Err(CommandError::NotFound(name)),
      },

      Command::Search { query } => {
        let found = self.book.search(&query);
        if found.is_empty() {
          format!("No contacts match {query:?}.")
        } else {
          found.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
        }
      }

      Command::ShowAll => self.show_all(),

      Command::Exit => return Ok(Reply::Exit("Good bye!".to_owned())),
    };
    Ok(Reply::Continue(text))
  }

  fn show_all(&self) -> String {
    if self.book.is_empty() {
      return "No contacts saved.".to_owned();
    }
    self
      .book
      .batches(self.batch_size)
      .map(|batch| batch.iter().map(describe_record).collect::<Vec<_>>().join("\n"))
      .collect::<Vec<_>>()
      .join("\n\n")
  }

  fn record(&self, name: &str) -> Result<&Record, CommandError> {
    self
      .book
      .find(name)
      .ok_or_else(|| CommandError::NotFound(name.to_owned()))
  }

  fn record_mut(&mut self, name: &str) -> Result<&mut Record, CommandError> {
    self
      .book
      .find_mut(name)
      .ok_or_else(|| CommandError::NotFound(name.to_owned()))
  }
}

fn build_record(
  name: &str,
  phone: &str,
  birthday: Option<&str>,
) -> Result<Record, rolodex_core::Error> {
  let mut record = Record::new(name, birthday)?;
  record.add_phone(phone)?;
  Ok(record)
}

fn join_phones(record: &Record) -> String {
  record
    .phones()
    .iter()
    .map(|p| p.value())
    .collect::<Vec<_>>()
    .join("; ")
}

fn describe_record(record: &Record) -> String {
  match record.days_to_birthday() {
    Some(days) => format!("{record}, days to birthday: {days}"),
    None => record.to_string(),
  }
}
