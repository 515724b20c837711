//! [`PersonService`]: the person lifecycle rules, applied before delegating
//! to a [`PersonStore`].
//!
//! The service holds no state of its own. `update` is a read followed by a
//! separate write with no isolation, so two concurrent updates of the same
//! person can lose one of the writes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
  outcome::{DeleteOutcome, UpdateOutcome},
  person::{NewPerson, Person, PersonId, PersonInput},
  store::PersonStore,
};

/// Create, fetch, update and delete persons against a store `S`.
pub struct PersonService<S> {
  store: Arc<S>,
}

impl<S> Clone for PersonService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PersonStore> PersonService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn get_by_id(
    &self,
    id: PersonId,
  ) -> Result<Option<Person>, S::Error> {
    info!(%id, "get person by id");
    self.store.find_by_id(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Person>, S::Error> {
    info!("get all persons");
    self.store.find_all().await
  }

  /// Store a new person built from `input`.
  ///
  /// `input.id` and both client timestamps are ignored: the creation and
  /// last-modification timestamps are the same reading of the clock.
  pub async fn create(&self, input: PersonInput) -> Result<Person, S::Error> {
    info!(first_name = %input.first_name, "create person");
    let now = Utc::now();
    let new = NewPerson {
      first_name:             input.first_name,
      last_name:              input.last_name,
      birth_date:             input.birth_date,
      creation_date:          now,
      last_modification_date: now,
    };
    self.store.insert(new).await
  }

  /// Replace the fields of an existing person.
  ///
  /// A `creation_date` carried by the input overwrites the stored one; when
  /// it is absent the stored value is kept.
  pub async fn update(
    &self,
    input: PersonInput,
  ) -> Result<UpdateOutcome, S::Error> {
    info!(first_name = %input.first_name, "update person");

    let Some(id) = input.id else {
      warn!(
        first_name = %input.first_name,
        "refusing to update a person with no id"
      );
      return Ok(UpdateOutcome::MissingId);
    };

    let Some(mut person) = self.store.find_by_id(id).await? else {
      warn!(%id, "no person with this id");
      return Ok(UpdateOutcome::NotFound(id));
    };

    person.first_name = input.first_name;
    person.last_name = input.last_name;
    person.birth_date = input.birth_date;
    if let Some(created) = input.creation_date {
      person.creation_date = created;
    }
    person.last_modification_date = Utc::now();

    let saved = self.store.save(person).await?;
    Ok(UpdateOutcome::Updated(saved))
  }

  /// Remove a person.
  ///
  /// A failure of the lookup propagates. A failure of the delete itself is
  /// logged and returned inside [`DeleteOutcome::Failed`].
  pub async fn delete_by_id(
    &self,
    id: PersonId,
  ) -> Result<DeleteOutcome<S::Error>, S::Error> {
    info!(%id, "delete person");

    if self.store.find_by_id(id).await?.is_none() {
      warn!(%id, "no person with this id");
      return Ok(DeleteOutcome::NotFound);
    }

    match self.store.delete_by_id(id).await {
      Ok(()) => Ok(DeleteOutcome::Deleted),
      Err(e) => {
        error!(%id, error = %e, "cannot delete person");
        Ok(DeleteOutcome::Failed(e))
      }
    }
  }

  /// Persons whose first name contains `fragment`.
  pub async fn search_by_first_name(
    &self,
    fragment: &str,
  ) -> Result<Vec<Person>, S::Error> {
    info!(fragment, "search persons by first name");
    self.store.find_by_first_name_containing(fragment).await
  }
}
