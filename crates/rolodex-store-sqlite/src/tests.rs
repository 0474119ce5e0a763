//! Save/load and session tests against real files in a temporary directory.

use std::{
  fs, panic,
  path::{Path, PathBuf},
};

use rolodex_core::{AddressBook, Record};
use tempfile::TempDir;

use crate::{Error, Persist, Session};

fn book_path() -> (TempDir, PathBuf) {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = dir.path().join("address_book.db");
  (dir, path)
}

fn john() -> Record {
  let mut record = Record::new("John", Some("1990-05-20")).unwrap();
  record.add_phone("1234567890").unwrap();
  record.add_phone("5555555555").unwrap();
  record
}

fn jane() -> Record {
  let mut record = Record::new("Jane", None).unwrap();
  record.add_phone("9876543210").unwrap();
  record
}

fn sample_book() -> AddressBook { [john(), jane()].into_iter().collect() }

// ─── Persist ─────────────────────────────────────────────────────────────────

#[test]
fn save_then_load_round_trips() {
  let (_dir, path) = book_path();
  let book = sample_book();
  book.save(&path).unwrap();

  let mut loaded = AddressBook::new();
  loaded.load(&path).unwrap();
  assert_eq!(loaded, book);

  let names: Vec<_> = loaded.iter().map(|r| r.name().value()).collect();
  assert_eq!(names, ["John", "Jane"]);
}

#[test]
fn reloaded_record_keeps_phones_and_birthday() {
  let (_dir, path) = book_path();
  let mut book = AddressBook::new();
  book.add_record(john());
  book.save(&path).unwrap();

  let mut reloaded = AddressBook::new();
  reloaded.load(&path).unwrap();
  let john = reloaded.find("John").expect("John survives a reload");
  assert!(john.find_phone("1234567890").is_some());
  assert!(john.find_phone("5555555555").is_some());
  assert_eq!(john.birthday().map(|b| b.value()), Some("1990-05-20"));
}

#[test]
fn load_missing_file_resets_to_empty() {
  let (_dir, path) = book_path();
  let mut book = sample_book();
  book.load(&path).unwrap();
  assert!(book.is_empty());
  assert!(!path.exists(), "load must not create the file");
}

#[test]
fn load_replaces_existing_contents() {
  let (_dir, path) = book_path();
  [jane()].into_iter().collect::<AddressBook>().save(&path).unwrap();

  let mut book = sample_book();
  book.load(&path).unwrap();
  assert_eq!(book.len(), 1);
  assert!(book.find("John").is_none());
}

#[test]
fn save_overwrites_previous_snapshot() {
  let (_dir, path) = book_path();
  sample_book().save(&path).unwrap();

  let mut book = sample_book();
  book.delete("Jane");
  book.save(&path).unwrap();

  let mut loaded = AddressBook::new();
  loaded.load(&path).unwrap();
  assert_eq!(loaded, book);
  assert!(!path.with_extension("db.tmp").exists());
}

#[test]
fn save_discards_stale_staging_file() {
  let (_dir, path) = book_path();
  let staging = path.with_extension("db.tmp");
  fs::write(&staging, b"left over from an interrupted save").unwrap();

  sample_book().save(&path).unwrap();
  assert!(!staging.exists());

  let mut loaded = AddressBook::new();
  loaded.load(&path).unwrap();
  assert_eq!(loaded, sample_book());
}

#[test]
fn save_replaces_a_foreign_file() {
  let (_dir, path) = book_path();
  fs::write(&path, b"not a database").unwrap();

  sample_book().save(&path).unwrap();
  let mut loaded = AddressBook::new();
  loaded.load(&path).unwrap();
  assert_eq!(loaded, sample_book());
}

#[test]
fn empty_file_loads_as_empty_book() {
  let (_dir, path) = book_path();
  fs::write(&path, b"").unwrap();

  let mut book = sample_book();
  book.load(&path).unwrap();
  assert!(book.is_empty());
}

#[test]
fn corrupt_file_is_an_error_and_leaves_book_untouched() {
  let (_dir, path) = book_path();
  fs::write(&path, vec![0xAB_u8; 4096]).unwrap();

  let mut book = sample_book();
  assert!(matches!(book.load(&path), Err(Error::Database(_))));
  assert_eq!(book, sample_book());
}

fn write_foreign_database(path: &Path) {
  let conn = rusqlite::Connection::open(path).unwrap();
  conn
    .execute_batch(
      "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL);
       INSERT INTO notes (body) VALUES ('keep me');",
    )
    .unwrap();
}

fn foreign_note_count(path: &Path) -> i64 {
  rusqlite::Connection::open(path)
    .unwrap()
    .query_row("SELECT count(*) FROM notes", [], |r| r.get(0))
    .unwrap()
}

#[test]
fn load_refuses_another_programs_database() {
  let (_dir, path) = book_path();
  write_foreign_database(&path);

  let mut book = sample_book();
  assert!(matches!(book.load(&path), Err(Error::ForeignFile(p)) if p == path));
  assert_eq!(book, sample_book());
}

#[test]
fn session_on_foreign_database_leaves_it_intact() {
  let (_dir, path) = book_path();
  write_foreign_database(&path);

  assert!(matches!(Session::open(&path), Err(Error::ForeignFile(_))));
  assert_eq!(foreign_note_count(&path), 1);
}

#[test]
fn save_into_missing_directory_fails() {
  let (dir, _) = book_path();
  let path = dir.path().join("no-such-dir").join("book.db");
  assert!(sample_book().save(&path).is_err());
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[test]
fn session_starts_empty_without_a_file() {
  let (_dir, path) = book_path();
  let session = Session::open(&path).unwrap();
  assert!(session.is_empty());
  assert_eq!(session.path(), path.as_path());
  session.close().unwrap();
  assert!(path.exists());
}

#[test]
fn session_close_persists_changes() {
  let (_dir, path) = book_path();
  let mut session = Session::open(&path).unwrap();
  session.add_record(john());
  session.close().unwrap();

  let session = Session::open(&path).unwrap();
  assert_eq!(session.find("John"), Some(&john()));
}

#[test]
fn session_saves_on_drop() {
  let (_dir, path) = book_path();
  {
    let mut session = Session::open(&path).unwrap();
    session.add_record(jane());
  }

  let mut book = AddressBook::new();
  book.load(&path).unwrap();
  assert!(book.contains("Jane"));
}

#[test]
fn session_saves_on_error_exit() {
  let (_dir, path) = book_path();

  fn edit(path: &Path) -> Result<(), rolodex_core::Error> {
    let mut session = Session::open(path).expect("open");
    session.add_record(john());
    session
      .find_mut("John")
      .expect("just added")
      .add_phone("1234567890")?;
    unreachable!("duplicate phone must fail");
  }

  assert!(matches!(edit(&path), Err(rolodex_core::Error::DuplicatePhone(_))));

  let mut book = AddressBook::new();
  book.load(&path).unwrap();
  assert_eq!(book.find("John"), Some(&john()));
}

#[test]
fn session_saves_on_panic() {
  let (_dir, path) = book_path();

  let result = panic::catch_unwind(|| {
    let mut session = Session::open(&path).unwrap();
    session.add_record(jane());
    panic!("interrupted");
  });
  assert!(result.is_err());

  let mut book = AddressBook::new();
  book.load(&path).unwrap();
  assert!(book.contains("Jane"));
}

#[test]
fn open_default_uses_address_book_db_in_working_directory() {
  let (dir, _) = book_path();
  let previous = std::env::current_dir().unwrap();
  std::env::set_current_dir(dir.path()).unwrap();

  let result = Session::open_default().and_then(Session::close);
  std::env::set_current_dir(previous).unwrap();

  result.unwrap();
  assert!(dir.path().join(crate::DEFAULT_BOOK_PATH).exists());
  assert_eq!(crate::DEFAULT_BOOK_PATH, "address_book.db");
}

#[test]
fn checkpoint_writes_without_closing() {
  let (_dir, path) = book_path();
  let mut session = Session::open(&path).unwrap();
  session.add_record(jane());
  session.checkpoint().unwrap();

  let mut book = AddressBook::new();
  book.load(&path).unwrap();
  assert_eq!(book.len(), 1);

  session.delete("Jane");
  drop(session);
  book.load(&path).unwrap();
  assert!(book.is_empty());
}
