//! Person types: the persisted record and the shapes used to create and
//! update it.
//!
//! All three serialise with camelCase field names (`firstName`, `birthDate`,
//! ...), which is the wire shape of the HTTP API.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned identifier of a [`Person`]. Never changes once assigned.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
  pub fn get(self) -> i64 { self.0 }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:                     PersonId,
  pub first_name:             String,
  pub last_name:              String,
  pub birth_date:             NaiveDate,
  /// Set once when the record is created.
  pub creation_date:          DateTime<Utc>,
  /// Refreshed on every successful update.
  pub last_modification_date: DateTime<Utc>,
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// A person that has not been stored yet. Input to
/// [`crate::store::PersonStore::insert`], which assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub first_name:             String,
  pub last_name:              String,
  pub birth_date:             NaiveDate,
  pub creation_date:          DateTime<Utc>,
  pub last_modification_date: DateTime<Utc>,
}

impl NewPerson {
  /// Attach a store-assigned identifier.
  pub fn with_id(self, id: PersonId) -> Person {
    Person {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      birth_date: self.birth_date,
      creation_date: self.creation_date,
      last_modification_date: self.last_modification_date,
    }
  }
}

// ─── PersonInput ─────────────────────────────────────────────────────────────

/// Caller-supplied body for create and update requests.
///
/// `id` is ignored on create and required on update. `creation_date` is only
/// read by update; `last_modification_date` is accepted for wire
/// compatibility and always ignored, since the service sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
  #[serde(default)]
  pub id:                     Option<PersonId>,
  pub first_name:             String,
  pub last_name:              String,
  pub birth_date:             NaiveDate,
  #[serde(default)]
  pub creation_date:          Option<DateTime<Utc>>,
  #[serde(default)]
  pub last_modification_date: Option<DateTime<Utc>>,
}

impl PersonInput {
  /// Convenience constructor with the id and timestamps left unset.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    birth_date: NaiveDate,
  ) -> Self {
    Self {
      id: None,
      first_name: first_name.into(),
      last_name: last_name.into(),
      birth_date,
      creation_date: None,
      last_modification_date: None,
    }
  }

  /// Same input, targeting the stored person `id`.
  pub fn for_id(mut self, id: PersonId) -> Self {
    self.id = Some(id);
    self
  }
}

impl From<Person> for PersonInput {
  fn from(p: Person) -> Self {
    Self {
      id:                     Some(p.id),
      first_name:             p.first_name,
      last_name:              p.last_name,
      birth_date:             p.birth_date,
      creation_date:          Some(p.creation_date),
      last_modification_date: Some(p.last_modification_date),
    }
  }
}
