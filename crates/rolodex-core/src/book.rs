//! [`AddressBook`] — the in-memory collection of contacts, keyed by name.
//!
//! Records keep the order in which their names were first added. Re-adding a
//! name replaces the record in its existing slot. Persistence lives in
//! `rolodex-store-sqlite`; this type never touches the filesystem.

use std::{collections::HashMap, num::NonZeroUsize, slice};

use crate::record::Record;

/// Records per batch when the caller has no preference.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
  records: Vec<Record>,
  /// Name → position in `records`.
  index:   HashMap<String, usize>,
}

impl AddressBook {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn iter(&self) -> slice::Iter<'_, Record> { self.records.iter() }

  pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

  pub fn clear(&mut self) {
    self.records.clear();
    self.index.clear();
  }

  /// Insert `record` under its name, returning the record it replaced.
  pub fn add_record(&mut self, record: Record) -> Option<Record> {
    let key = record.name().value().to_owned();
    match self.index.get(&key) {
      Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
      None => {
        self.index.insert(key, self.records.len());
        self.records.push(record);
        None
      }
    }
  }

  /// Exact, case-sensitive lookup by name.
  pub fn find(&self, name: &str) -> Option<&Record> {
    self.index.get(name).map(|&pos| &self.records[pos])
  }

  pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
    self.index.get(name).map(|&pos| &mut self.records[pos])
  }

  /// Remove the record named `name`. Deleting a missing name does nothing.
  pub fn delete(&mut self, name: &str) -> Option<Record> {
    let pos = self.index.remove(name)?;
    for slot in self.index.values_mut() {
      if *slot > pos {
        *slot -= 1;
      }
    }
    Some(self.records.remove(pos))
  }

  /// Split the book, in insertion order, into consecutive groups of at most
  /// `size` records. Every call starts a fresh pass.
  pub fn batches(&self, size: NonZeroUsize) -> slice::Chunks<'_, Record> {
    self.records.chunks(size.get())
  }

  /// Records whose name contains `query` ignoring case, or which hold a phone
  /// containing `query` verbatim. Each record appears once, in book order.
  pub fn search(&self, query: &str) -> Vec<&Record> {
    let needle = query.to_lowercase();
    self
      .records
      .iter()
      .filter(|record| {
        record.name().value().to_lowercase().contains(&needle)
          || record.phones().iter().any(|p| p.value().contains(query))
      })
      .collect()
  }
}

impl FromIterator<Record> for AddressBook {
  fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
    let mut book = Self::new();
    book.extend(iter);
    book
  }
}

impl Extend<Record> for AddressBook {
  fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
    for record in iter {
      self.add_record(record);
    }
  }
}

impl<'a> IntoIterator for &'a AddressBook {
  type Item = &'a Record;
  type IntoIter = slice::Iter<'a, Record>;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}
