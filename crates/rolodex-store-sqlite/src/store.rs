//! [`Persist`] — saving and loading a whole [`AddressBook`] as a SQLite file.

use std::{
  fs,
  path::{Path, PathBuf},
};

use rolodex_core::AddressBook;
use rusqlite::{Connection, OpenFlags};

use crate::{
  Error, Result,
  encode::RawRecord,
  schema::{SCHEMA, SCHEMA_VERSION},
};

/// Snapshot persistence for an address book.
///
/// Import the trait to call `book.save(path)` and `book.load(path)`.
pub trait Persist {
  /// Write the entire book to `path`, replacing whatever was there.
  ///
  /// The snapshot is first written to a sibling `<path>.tmp` staging file
  /// (any stale one is removed) and then renamed over `path`.
  fn save(&self, path: impl AsRef<Path>) -> Result<()>;

  /// Replace the book's contents with the snapshot at `path`. A missing file
  /// yields an empty book, and so does an empty database file. A SQLite file
  /// written by another program is refused with [`Error::ForeignFile`]. On
  /// error the book is left untouched.
  fn load(&mut self, path: impl AsRef<Path>) -> Result<()>;
}

impl Persist for AddressBook {
  fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let rows = self
      .iter()
      .map(RawRecord::from_record)
      .collect::<Result<Vec<_>>>()?;

    // The target is only replaced once the staging file is complete.
    let staging = staging_path(path);
    remove_if_present(&staging)?;
    if let Err(e) = write_snapshot(&staging, &rows) {
      remove_if_present(&staging).ok();
      return Err(e);
    }
    fs::rename(&staging, path)?;

    tracing::debug!(path = %path.display(), records = rows.len(), "saved address book");
    Ok(())
  }

  fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.try_exists()? {
      tracing::debug!(path = %path.display(), "no address book file; starting empty");
      self.clear();
      return Ok(());
    }

    let rows = read_snapshot(path)?;
    let records = rows
      .into_iter()
      .map(RawRecord::into_record)
      .collect::<Result<Vec<_>>>()?;

    tracing::debug!(path = %path.display(), records = records.len(), "loaded address book");
    *self = records.into_iter().collect();
    Ok(())
  }
}

fn write_snapshot(path: &Path, rows: &[RawRecord]) -> Result<()> {
  let mut conn = Connection::open(path)?;
  conn.execute_batch(SCHEMA)?;

  let tx = conn.transaction()?;
  {
    let mut stmt = tx.prepare(
      "INSERT INTO contacts (position, name, phones, birthday)
       VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (position, row) in rows.iter().enumerate() {
      stmt.execute(rusqlite::params![
        position as i64,
        row.name,
        row.phones,
        row.birthday,
      ])?;
    }
  }
  tx.commit()?;

  conn.close().map_err(|(_, e)| Error::Database(e))
}

fn read_snapshot(path: &Path) -> Result<Vec<RawRecord>> {
  let conn = Connection::open_with_flags(
    path,
    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
  )?;

  let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
  match version {
    // Version 0 with no schema objects is an empty database file.
    0 => {
      let objects: i64 =
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |r| r.get(0))?;
      if objects == 0 {
        return Ok(Vec::new());
      }
      return Err(Error::ForeignFile(path.to_path_buf()));
    }
    SCHEMA_VERSION => {}
    other => return Err(Error::UnsupportedVersion(other)),
  }

  let mut stmt =
    conn.prepare("SELECT name, phones, birthday FROM contacts ORDER BY position")?;
  let rows = stmt
    .query_map([], |row| {
      Ok(RawRecord {
        name:     row.get(0)?,
        phones:   row.get(1)?,
        birthday: row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(rows)
}

/// `<path>.tmp`, in the same directory so the final rename stays atomic.
fn staging_path(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_owned();
  name.push(".tmp");
  PathBuf::from(name)
}

fn remove_if_present(path: &Path) -> Result<()> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e.into()),
  }
}
