//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and birth dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use persons_core::{Person, PersonId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str =
  "id, first_name, last_name, birth_date, creation_date, last_modification_date";

/// Raw values read directly from a `persons` row.
pub struct RawPerson {
  pub id:                     i64,
  pub first_name:             String,
  pub last_name:              String,
  pub birth_date:             String,
  pub creation_date:          String,
  pub last_modification_date: String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                     row.get(0)?,
      first_name:             row.get(1)?,
      last_name:              row.get(2)?,
      birth_date:             row.get(3)?,
      creation_date:          row.get(4)?,
      last_modification_date: row.get(5)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:                     PersonId(self.id),
      first_name:             self.first_name,
      last_name:              self.last_name,
      birth_date:             decode_date(&self.birth_date)?,
      creation_date:          decode_dt(&self.creation_date)?,
      last_modification_date: decode_dt(&self.last_modification_date)?,
    })
  }
}
