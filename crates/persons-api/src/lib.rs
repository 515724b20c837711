//! JSON REST API for person records.
//!
//! Exposes an axum [`Router`] backed by a [`PersonService`] over any
//! [`PersonStore`]. Tracing, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", persons_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod persons;

use std::sync::Arc;

use axum::{Router, routing::get};
use persons_core::{PersonService, PersonStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Collection routes answer with and without the
/// trailing slash.
pub fn api_router<S>(service: Arc<PersonService<S>>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route(
      "/persons",
      get(persons::list::<S>)
        .post(persons::create::<S>)
        .put(persons::update::<S>),
    )
    .route(
      "/persons/",
      get(persons::list::<S>)
        .post(persons::create::<S>)
        .put(persons::update::<S>),
    )
    .route("/persons/search", get(persons::search::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>).delete(persons::delete_one::<S>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use persons_core::{NewPerson, Person, PersonId};
  use persons_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_service() -> Arc<PersonService<SqliteStore>> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    Arc::new(PersonService::new(Arc::new(store)))
  }

  async fn oneshot_raw<S>(
    service: Arc<PersonService<S>>,
    method:  &str,
    uri:     &str,
    body:    Option<Value>,
  ) -> Response
  where
    S: PersonStore + 'static,
  {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(service).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn salima() -> Value {
    json!({ "firstName": "salima", "lastName": "Gau", "birthDate": "1999-01-07" })
  }

  async fn create(service: &Arc<PersonService<SqliteStore>>, body: Value) -> Value {
    let resp = oneshot_raw(service.clone(), "POST", "/persons/", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
  }

  // ── GET collection ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_store_returns_empty_array() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "GET", "/persons/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
  }

  #[tokio::test]
  async fn list_returns_created_persons() {
    let service = make_service().await;
    create(&service, salima()).await;

    let resp = oneshot_raw(service, "GET", "/persons/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["firstName"], "salima");
  }

  #[tokio::test]
  async fn list_without_trailing_slash_is_routed() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "GET", "/persons", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── POST ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_assigned_id() {
    let service = make_service().await;
    let body = create(&service, salima()).await;

    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["firstName"], "salima");
    assert_eq!(body["lastName"], "Gau");
    assert_eq!(body["birthDate"], "1999-01-07");
    assert_eq!(body["creationDate"], body["lastModificationDate"]);
  }

  #[tokio::test]
  async fn create_with_malformed_body_is_rejected() {
    let service = make_service().await;
    let resp = oneshot_raw(
      service,
      "POST",
      "/persons/",
      Some(json!({ "firstName": "salima" })),
    )
    .await;
    assert!(resp.status().is_client_error());
  }

  // ── GET one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_existing_returns_person() {
    let service = make_service().await;
    let created = create(&service, salima()).await;
    let id = created["id"].as_i64().unwrap();

    let resp = oneshot_raw(service, "GET", &format!("/persons/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, created);
  }

  #[tokio::test]
  async fn get_missing_returns_200_with_null() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "GET", "/persons/12345", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, Value::Null);
  }

  #[tokio::test]
  async fn get_with_non_numeric_id_returns_400() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "GET", "/persons/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── PUT ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_replaces_fields() {
    let service = make_service().await;
    let created = create(
      &service,
      json!({ "firstName": "person1fn", "lastName": "person1ln", "birthDate": "1999-01-07" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = oneshot_raw(
      service.clone(),
      "PUT",
      "/persons/",
      Some(json!({
        "id": id,
        "firstName": "differentName",
        "lastName": "person1ln",
        "birthDate": "1999-01-07",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["firstName"], "differentName");

    let resp = oneshot_raw(service, "GET", &format!("/persons/{id}"), None).await;
    assert_eq!(body_json(resp).await["firstName"], "differentName");
  }

  #[tokio::test]
  async fn update_without_id_returns_200_with_null() {
    let service = make_service().await;
    let resp = oneshot_raw(service.clone(), "PUT", "/persons/", Some(salima())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, Value::Null);

    let resp = oneshot_raw(service, "GET", "/persons/", None).await;
    assert_eq!(body_json(resp).await, json!([]));
  }

  #[tokio::test]
  async fn update_unknown_id_returns_200_with_null() {
    let service = make_service().await;
    let mut body = salima();
    body["id"] = json!(77);
    let resp = oneshot_raw(service, "PUT", "/persons/", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, Value::Null);
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_filters_by_first_name_fragment() {
    let service = make_service().await;
    for name in ["person1fn", "person2fn", "differentFirstName"] {
      create(
        &service,
        json!({ "firstName": name, "lastName": "x", "birthDate": "2004-01-07" }),
      )
      .await;
    }

    let resp =
      oneshot_raw(service, "GET", "/persons/search?firstName=per", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 2);
  }

  // ── DELETE ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_existing_returns_true_and_get_returns_null() {
    let service = make_service().await;
    let id = create(&service, salima()).await["id"].as_i64().unwrap();

    let resp =
      oneshot_raw(service.clone(), "DELETE", &format!("/persons/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!(true));

    let resp = oneshot_raw(service, "GET", &format!("/persons/{id}"), None).await;
    assert_eq!(body_json(resp).await, Value::Null);
  }

  #[tokio::test]
  async fn delete_missing_returns_200_with_false() {
    let service = make_service().await;
    let resp = oneshot_raw(service, "DELETE", "/persons/9", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!(false));
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("database unavailable")]
  struct Unavailable;

  /// Finds one person under every id but refuses every write.
  struct BrokenStore;

  fn ghost(id: PersonId) -> Person {
    let now = chrono::Utc::now();
    NewPerson {
      first_name:             "ghost".into(),
      last_name:              "row".into(),
      birth_date:             chrono::NaiveDate::from_ymd_opt(1999, 1, 7).unwrap(),
      creation_date:          now,
      last_modification_date: now,
    }
    .with_id(id)
  }

  impl PersonStore for BrokenStore {
    type Error = Unavailable;

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, Unavailable> {
      Ok(Some(ghost(id)))
    }

    async fn find_all(&self) -> Result<Vec<Person>, Unavailable> {
      Err(Unavailable)
    }

    async fn insert(&self, _person: NewPerson) -> Result<Person, Unavailable> {
      Err(Unavailable)
    }

    async fn save(&self, _person: Person) -> Result<Person, Unavailable> {
      Err(Unavailable)
    }

    async fn delete_by_id(&self, _id: PersonId) -> Result<(), Unavailable> {
      Err(Unavailable)
    }

    async fn find_by_first_name_containing<'a>(
      &'a self,
      _fragment: &'a str,
    ) -> Result<Vec<Person>, Unavailable> {
      Err(Unavailable)
    }
  }

  fn broken() -> Arc<PersonService<BrokenStore>> {
    Arc::new(PersonService::new(Arc::new(BrokenStore)))
  }

  #[tokio::test]
  async fn create_store_failure_returns_500() {
    let resp = oneshot_raw(broken(), "POST", "/persons/", Some(salima())).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("database unavailable"));
  }

  #[tokio::test]
  async fn update_store_failure_returns_500() {
    let mut body = salima();
    body["id"] = json!(1);
    let resp = oneshot_raw(broken(), "PUT", "/persons/", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[tokio::test]
  async fn delete_store_failure_returns_200_with_false() {
    let resp = oneshot_raw(broken(), "DELETE", "/persons/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!(false));
  }
}
