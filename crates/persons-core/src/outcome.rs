//! Results of the service operations that can be refused without an error.

use crate::person::{Person, PersonId};

/// Result of [`crate::service::PersonService::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
  Updated(Person),
  /// The input carried no identifier; the store was not touched.
  MissingId,
  /// No person is stored under the identifier; nothing was written.
  NotFound(PersonId),
}

impl UpdateOutcome {
  /// The updated person, if any.
  pub fn into_person(self) -> Option<Person> {
    match self {
      Self::Updated(p) => Some(p),
      Self::MissingId | Self::NotFound(_) => None,
    }
  }
}

/// Result of [`crate::service::PersonService::delete_by_id`].
#[derive(Debug)]
pub enum DeleteOutcome<E> {
  Deleted,
  /// No person is stored under the identifier; delete was never attempted.
  NotFound,
  /// The store failed while deleting. The failure has been logged.
  Failed(E),
}

impl<E> DeleteOutcome<E> {
  pub fn is_deleted(&self) -> bool { matches!(self, Self::Deleted) }

  /// The store failure that prevented the delete, if any.
  pub fn cause(&self) -> Option<&E> {
    match self {
      Self::Failed(e) => Some(e),
      Self::Deleted | Self::NotFound => None,
    }
  }
}
