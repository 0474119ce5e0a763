//! Conversion between [`Record`] and the plain-text columns of a `contacts`
//! row.
//!
//! Phones are stored as a compact JSON array of strings. Decoding goes back
//! through the validating constructors, so a tampered file cannot produce a
//! record that breaks the field rules.

use rolodex_core::{Phone, Record};

use crate::Result;

// ─── Phones ──────────────────────────────────────────────────────────────────

pub fn encode_phones(phones: &[Phone]) -> Result<String> {
  Ok(serde_json::to_string(phones)?)
}

pub fn decode_phones(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw column values of one `contacts` row.
#[derive(Debug)]
pub struct RawRecord {
  pub name:     String,
  pub phones:   String,
  pub birthday: Option<String>,
}

impl RawRecord {
  pub fn from_record(record: &Record) -> Result<Self> {
    Ok(Self {
      name:     record.name().value().to_owned(),
      phones:   encode_phones(record.phones())?,
      birthday: record.birthday().map(|b| b.value().to_owned()),
    })
  }

  pub fn into_record(self) -> Result<Record> {
    let mut record = Record::new(&self.name, self.birthday.as_deref())?;
    for phone in decode_phones(&self.phones)? {
      record.add_phone(&phone)?;
    }
    Ok(record)
  }
}
