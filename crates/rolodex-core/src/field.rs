//! Validated fields — the typed values a contact record is built from.
//!
//! Every field keeps the text it was given and is only ever constructed or
//! mutated through its [`Rule`]. A failed update leaves the previous value in
//! place.

use std::{fmt, hash::Hash, marker::PhantomData, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Date format accepted for birthdays.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

// ─── Rules ───────────────────────────────────────────────────────────────────

/// A validation predicate for one kind of field.
///
/// `parse` returns the structured form of a valid value (or `()` when there is
/// nothing to extract) and `None` when the value is rejected.
pub trait Rule {
  /// Field label reported in [`Error::Validation`].
  const FIELD: &'static str;

  type Parsed: Clone + fmt::Debug;

  fn parse(raw: &str) -> Option<Self::Parsed>;

  fn is_valid(raw: &str) -> bool { Self::parse(raw).is_some() }
}

/// Contact names; any string is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule;

impl Rule for NameRule {
  const FIELD: &'static str = "name";
  type Parsed = ();

  fn parse(_raw: &str) -> Option<()> { Some(()) }
}

/// Phone numbers: exactly ten ASCII decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRule;

impl Rule for PhoneRule {
  const FIELD: &'static str = "phone";
  type Parsed = ();

  fn parse(raw: &str) -> Option<()> {
    (raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit())).then_some(())
  }
}

/// Birthdays: a real calendar date written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayRule;

impl Rule for BirthdayRule {
  const FIELD: &'static str = "birthday";
  type Parsed = NaiveDate;

  fn parse(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT).ok()
  }
}

// ─── Field ───────────────────────────────────────────────────────────────────

/// A value that always satisfies the rule `R`.
#[derive(Clone)]
pub struct Field<R: Rule> {
  raw:    String,
  parsed: R::Parsed,
  _rule:  PhantomData<R>,
}

pub type Name = Field<NameRule>;
pub type Phone = Field<PhoneRule>;
pub type Birthday = Field<BirthdayRule>;

impl<R: Rule> Field<R> {
  /// Validate `value` and wrap it.
  pub fn new(value: impl Into<String>) -> Result<Self> {
    let raw = value.into();
    let parsed = Self::check(&raw)?;
    Ok(Self { raw, parsed, _rule: PhantomData })
  }

  /// Replace the value. On failure the current value is kept.
  pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
    let raw = value.into();
    self.parsed = Self::check(&raw)?;
    self.raw = raw;
    Ok(())
  }

  pub fn value(&self) -> &str { &self.raw }

  pub fn is_valid(value: &str) -> bool { R::is_valid(value) }

  fn check(raw: &str) -> Result<R::Parsed> {
    R::parse(raw).ok_or_else(|| Error::Validation {
      field: R::FIELD,
      value: raw.to_owned(),
    })
  }
}

impl Field<BirthdayRule> {
  pub fn date(&self) -> NaiveDate { self.parsed }

  /// The birthday's month and day in `year`. A 29 February birthday is
  /// observed on 28 February in non-leap years.
  pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, self.parsed.month(), self.parsed.day())
      .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
  }

  /// The first occurrence of the birthday on or after `today`.
  pub fn next_after(&self, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = self.in_year(today.year())?;
    if this_year < today {
      self.in_year(today.year() + 1)
    } else {
      Some(this_year)
    }
  }
}

// Identity is the stored text; `parsed` is derived from it.
impl<R: Rule> PartialEq for Field<R> {
  fn eq(&self, other: &Self) -> bool { self.raw == other.raw }
}

impl<R: Rule> Eq for Field<R> {}

impl<R: Rule> Hash for Field<R> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.raw.hash(state) }
}

impl<R: Rule> fmt::Debug for Field<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple(R::FIELD).field(&self.raw).finish()
  }
}

impl<R: Rule> fmt::Display for Field<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl<R: Rule> FromStr for Field<R> {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl<R: Rule> Serialize for Field<R> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.raw)
  }
}

impl<'de, R: Rule> Deserialize<'de> for Field<R> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Self::new(raw).map_err(serde::de::Error::custom)
  }
}
