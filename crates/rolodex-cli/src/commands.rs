//! Parsing of the line-oriented command language.

use thiserror::Error;

// ─── Command ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Hello,
  /// Add a new contact; refused if the name is taken.
  Add { name: String, phone: String, birthday: Option<String> },
  /// Replace a contact unconditionally.
  Change { name: String, phone: String, birthday: Option<String> },
  AddPhone { name: String, phone: String },
  EditPhone { name: String, old: String, new: String },
  RemovePhone { name: String, phone: String },
  Phone { name: String },
  Birthday { name: String },
  Delete { name: String },
  Search { query: String },
  ShowAll,
  Exit,
}

/// Input that does not form a known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid command")]
pub struct InvalidCommand;

/// Usage summary printed by `hello`.
pub const USAGE: &str = "\
Commands:
  add <name> <phone> [<YYYY-MM-DD>]     add a new contact
  change <name> <phone> [<YYYY-MM-DD>]  replace a contact
  add-phone <name> <phone>              add another phone number
  edit-phone <name> <old> <new>         replace a phone number
  remove-phone <name> <phone>           remove a phone number
  phone <name>                          show a contact's phone numbers
  birthday <name>                       days until a contact's birthday
  delete <name>                         delete a contact
  search <text>                         find contacts by name or phone
  show all                              list every contact
  good bye | close | exit               save and quit";

impl Command {
  /// Parse one input line. Keywords are case-insensitive; arguments are
  /// whitespace-separated and kept verbatim.
  pub fn parse(line: &str) -> Result<Self, InvalidCommand> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((keyword, args)) = words.split_first() else {
      return Err(InvalidCommand);
    };
    let keyword = keyword.to_lowercase();

    let owned = |i: usize| args[i].to_owned();
    let command = match (keyword.as_str(), args.len()) {
      ("hello", 0) => Self::Hello,
      ("add", 2 | 3) => Self::Add {
        name:     owned(0),
        phone:    owned(1),
        birthday: args.get(2).map(|b| (*b).to_owned()),
      },
      ("change", 2 | 3) => Self::Change {
        name:     owned(0),
        phone:    owned(1),
        birthday: args.get(2).map(|b| (*b).to_owned()),
      },
      ("add-phone", 2) => Self::AddPhone { name: owned(0), phone: owned(1) },
      ("edit-phone", 3) => Self::EditPhone {
        name: owned(0),
        old:  owned(1),
        new:  owned(2),
      },
      ("remove-phone", 2) => Self::RemovePhone { name: owned(0), phone: owned(1) },
      ("phone", 1) => Self::Phone { name: owned(0) },
      ("birthday", 1) => Self::Birthday { name: owned(0) },
      ("delete", 1) => Self::Delete { name: owned(0) },
      ("search", 1..) => Self::Search { query: args.join(" ") },
      ("show", 1) if args[0].eq_ignore_ascii_case("all") => Self::ShowAll,
      ("good", 1) if args[0].eq_ignore_ascii_case("bye") => Self::Exit,
      ("close" | "exit", 0) => Self::Exit,
      _ => return Err(InvalidCommand),
    };
    Ok(command)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_add_with_and_without_birthday() {
    assert_eq!(
      Command::parse("add John 1234567890"),
      Ok(Command::Add {
        name:     "John".into(),
        phone:    "1234567890".into(),
        birthday: None,
      })
    );
    assert_eq!(
      Command::parse("  ADD John 1234567890 1990-05-20\n"),
      Ok(Command::Add {
        name:     "John".into(),
        phone:    "1234567890".into(),
        birthday: Some("1990-05-20".into()),
      })
    );
  }

  #[test]
  fn parses_two_word_commands() {
    assert_eq!(Command::parse("show all"), Ok(Command::ShowAll));
    assert_eq!(Command::parse("Show ALL"), Ok(Command::ShowAll));
    assert_eq!(Command::parse("good bye"), Ok(Command::Exit));
    assert_eq!(Command::parse("close"), Ok(Command::Exit));
    assert_eq!(Command::parse("exit"), Ok(Command::Exit));
  }

  #[test]
  fn search_keeps_the_whole_query() {
    assert_eq!(
      Command::parse("search John Smith"),
      Ok(Command::Search { query: "John Smith".into() })
    );
  }

  #[test]
  fn rejects_unknown_and_malformed_input() {
    for line in [
      "",
      "   ",
      "frobnicate",
      "add",
      "add John",
      "add John 1234567890 1990-05-20 extra",
      "phone",
      "show",
      "show everything",
      "good night",
      "exit now",
      "search",
    ] {
      assert_eq!(Command::parse(line), Err(InvalidCommand), "{line:?}");
    }
  }
}
