//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons/` | All persons |
//! | `GET`    | `/persons/search` | `?firstName=<fragment>`, case-sensitive |
//! | `GET`    | `/persons/{id}` | `null` body if absent, still `200` |
//! | `POST`   | `/persons/` | Body: [`PersonInput`]; returns 201 with the stored person |
//! | `PUT`    | `/persons/` | Body: [`PersonInput`] with `id`; `null` if refused |
//! | `DELETE` | `/persons/{id}` | `true` or `false`, always `200` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use persons_core::{Person, PersonId, PersonInput, PersonService, PersonStore};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons/`
pub async fn list<S>(
  State(service): State<Arc<PersonService<S>>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
{
  let persons = service.get_all().await.map_err(ApiError::store)?;
  Ok(Json(persons))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
  #[serde(default)]
  pub first_name: String,
}

/// `GET /persons/search?firstName=<fragment>`
pub async fn search<S>(
  State(service): State<Arc<PersonService<S>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
{
  let persons = service
    .search_by_first_name(&params.first_name)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(persons))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/{id}`
pub async fn get_one<S>(
  State(service): State<Arc<PersonService<S>>>,
  Path(id): Path<PersonId>,
) -> Result<Json<Option<Person>>, ApiError>
where
  S: PersonStore,
{
  let person = service.get_by_id(id).await.map_err(ApiError::store)?;
  Ok(Json(person))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons/` returns 201 with the stored [`Person`].
pub async fn create<S>(
  State(service): State<Arc<PersonService<S>>>,
  Json(body): Json<PersonInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  let person = service.create(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/`: the body must carry the `id` of a stored person.
pub async fn update<S>(
  State(service): State<Arc<PersonService<S>>>,
  Json(body): Json<PersonInput>,
) -> Result<Json<Option<Person>>, ApiError>
where
  S: PersonStore,
{
  let outcome = service.update(body).await.map_err(ApiError::store)?;
  Ok(Json(outcome.into_person()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/{id}`
pub async fn delete_one<S>(
  State(service): State<Arc<PersonService<S>>>,
  Path(id): Path<PersonId>,
) -> Result<Json<bool>, ApiError>
where
  S: PersonStore,
{
  let outcome = service.delete_by_id(id).await.map_err(ApiError::store)?;
  Ok(Json(outcome.is_deleted()))
}
