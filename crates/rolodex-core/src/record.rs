//! A single contact: a fixed name, an ordered set of phone numbers and an
//! optional birthday.

use std::fmt;

use chrono::{Local, NaiveDate};

use crate::{
  Error, Result,
  field::{Birthday, Name, Phone},
};

/// Shown in place of a missing birthday.
pub const NO_BIRTHDAY: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  name:     Name,
  phones:   Vec<Phone>,
  birthday: Option<Birthday>,
}

impl Record {
  /// Build a record with no phones. Fails if the name is empty or the
  /// birthday is not a `YYYY-MM-DD` date.
  pub fn new(name: &str, birthday: Option<&str>) -> Result<Self> {
    if name.is_empty() {
      return Err(Error::EmptyName);
    }
    Ok(Self {
      name:     Name::new(name)?,
      phones:   Vec::new(),
      birthday: birthday.map(Birthday::new).transpose()?,
    })
  }

  pub fn name(&self) -> &Name { &self.name }

  pub fn phones(&self) -> &[Phone] { &self.phones }

  pub fn birthday(&self) -> Option<&Birthday> { self.birthday.as_ref() }

  pub fn set_birthday(&mut self, birthday: Option<&str>) -> Result<()> {
    self.birthday = birthday.map(Birthday::new).transpose()?;
    Ok(())
  }

  // ── Phones ──────────────────────────────────────────────────────────────

  pub fn add_phone(&mut self, phone: &str) -> Result<()> {
    let phone = Phone::new(phone)?;
    if self.phones.contains(&phone) {
      return Err(Error::DuplicatePhone(phone.value().to_owned()));
    }
    self.phones.push(phone);
    Ok(())
  }

  /// Remove every phone equal to `phone`. Returns whether anything was
  /// removed; an absent number is not an error.
  pub fn remove_phone(&mut self, phone: &str) -> bool {
    let before = self.phones.len();
    self.phones.retain(|p| p.value() != phone);
    self.phones.len() != before
  }

  pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
    self.phones.iter().find(|p| p.value() == phone)
  }

  /// Replace `old` with `new` in place, keeping its position.
  ///
  /// `new` is validated first, so an invalid replacement reports
  /// [`Error::Validation`] even when `old` is missing.
  pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<()> {
    let replacement = Phone::new(new)?;
    let index = self
      .phones
      .iter()
      .position(|p| p.value() == old)
      .ok_or_else(|| Error::PhoneNotFound(old.to_owned()))?;

    if old != new && self.phones.contains(&replacement) {
      return Err(Error::DuplicatePhone(new.to_owned()));
    }
    self.phones[index] = replacement;
    Ok(())
  }

  // ── Birthday ────────────────────────────────────────────────────────────

  /// Days from today (local date) until the next birthday, `0` on the day
  /// itself. `None` if no birthday is set.
  pub fn days_to_birthday(&self) -> Option<i64> {
    self.days_to_birthday_from(Local::now().date_naive())
  }

  pub fn days_to_birthday_from(&self, today: NaiveDate) -> Option<i64> {
    let next = self.birthday.as_ref()?.next_after(today)?;
    Some((next - today).num_days())
  }
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let phones = self
      .phones
      .iter()
      .map(Phone::value)
      .collect::<Vec<_>>()
      .join("; ");
    let birthday = self.birthday.as_ref().map_or(NO_BIRTHDAY, Birthday::value);
    write!(f, "Contact name: {}, phones: {phones}, birthday: {birthday}", self.name)
  }
}
