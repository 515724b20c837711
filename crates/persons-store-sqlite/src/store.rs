//! [`SqliteStore`], the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use persons_core::{NewPerson, Person, PersonId, PersonStore};

use crate::{
  encode::{PERSON_COLUMNS, RawPerson, encode_date, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` over [`PERSON_COLUMNS`] with a single text parameter.
  async fn query_persons(
    &self,
    sql: String,
    param: Option<String>,
  ) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
    let sql = format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?1");

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id.get()], RawPerson::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Person>> {
    self
      .query_persons(
        format!("SELECT {PERSON_COLUMNS} FROM persons ORDER BY id"),
        None,
      )
      .await
  }

  async fn insert(&self, person: NewPerson) -> Result<Person> {
    let first_name = person.first_name.clone();
    let last_name = person.last_name.clone();
    let birth_str = encode_date(person.birth_date);
    let created_str = encode_dt(person.creation_date);
    let modified_str = encode_dt(person.last_modification_date);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             first_name, last_name, birth_date,
             creation_date, last_modification_date
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            first_name,
            last_name,
            birth_str,
            created_str,
            modified_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(person.with_id(PersonId(id)))
  }

  async fn save(&self, person: Person) -> Result<Person> {
    let id = person.id.get();
    let first_name = person.first_name.clone();
    let last_name = person.last_name.clone();
    let birth_str = encode_date(person.birth_date);
    let created_str = encode_dt(person.creation_date);
    let modified_str = encode_dt(person.last_modification_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             id, first_name, last_name, birth_date,
             creation_date, last_modification_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT(id) DO UPDATE SET
             first_name             = excluded.first_name,
             last_name              = excluded.last_name,
             birth_date             = excluded.birth_date,
             creation_date          = excluded.creation_date,
             last_modification_date = excluded.last_modification_date",
          rusqlite::params![
            id,
            first_name,
            last_name,
            birth_str,
            created_str,
            modified_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn delete_by_id(&self, id: PersonId) -> Result<()> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE id = ?1",
          rusqlite::params![id.get()],
        )?)
      })
      .await?;

    if removed == 0 {
      return Err(Error::PersonNotFound(id));
    }
    Ok(())
  }

  async fn find_by_first_name_containing<'a>(
    &'a self,
    fragment: &'a str,
  ) -> Result<Vec<Person>> {
    // Case-sensitive substring match.
    self
      .query_persons(
        format!(
          "SELECT {PERSON_COLUMNS} FROM persons
           WHERE instr(first_name, ?1) > 0
           ORDER BY id"
        ),
        Some(fragment.to_owned()),
      )
      .await
  }
}
