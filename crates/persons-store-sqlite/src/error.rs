//! Error type for `persons-store-sqlite`.

use persons_core::PersonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to delete a person that is not stored.
  #[error("person not found: {0}")]
  PersonNotFound(PersonId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
