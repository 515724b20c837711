//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `persons-store-sqlite`).
//! [`crate::service::PersonService`] depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::person::{NewPerson, Person, PersonId};

/// Abstraction over durable keyed storage of [`Person`] records.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a person by identifier. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All stored persons, in store-defined order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Persist a new person and return it with its assigned identifier.
  fn insert(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Insert or replace the record stored under `person.id`.
  fn save(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Permanently remove the record stored under `id`.
  ///
  /// Behaviour for an absent `id` is backend-defined.
  fn delete_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persons whose first name contains `fragment` (case-sensitive).
  fn find_by_first_name_containing<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;
}
