//! Async HTTP client wrapping the person JSON API.

use anyhow::{Context, Result, anyhow};
use persons_core::{Person, PersonId, PersonInput};
use reqwest::{Client, Response};
use std::time::Duration;

/// Async HTTP client for the person JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET /api/persons/`
  pub async fn list(&self) -> Result<Vec<Person>> {
    let resp = self
      .client
      .get(self.url("/persons/"))
      .send()
      .await
      .context("GET /persons/ failed")?;
    decode(resp, "GET /persons/").await
  }

  /// `GET /api/persons/search?firstName=<fragment>`
  pub async fn search(&self, fragment: &str) -> Result<Vec<Person>> {
    let resp = self
      .client
      .get(self.url("/persons/search"))
      .query(&[("firstName", fragment)])
      .send()
      .await
      .context("GET /persons/search failed")?;
    decode(resp, "GET /persons/search").await
  }

  /// `GET /api/persons/<id>`, `None` when the server answers `null`.
  pub async fn get(&self, id: PersonId) -> Result<Option<Person>> {
    let what = item_route("GET", id);
    let resp = self
      .client
      .get(self.url(&format!("/persons/{id}")))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    decode(resp, &what).await
  }

  /// `POST /api/persons/`
  pub async fn create(&self, input: &PersonInput) -> Result<Person> {
    let resp = self
      .client
      .post(self.url("/persons/"))
      .json(input)
      .send()
      .await
      .context("POST /persons/ failed")?;
    decode(resp, "POST /persons/").await
  }

  /// `PUT /api/persons/`, `None` when the server refused the update.
  pub async fn update(&self, input: &PersonInput) -> Result<Option<Person>> {
    let resp = self
      .client
      .put(self.url("/persons/"))
      .json(input)
      .send()
      .await
      .context("PUT /persons/ failed")?;
    decode(resp, "PUT /persons/").await
  }

  /// `DELETE /api/persons/<id>`
  pub async fn delete(&self, id: PersonId) -> Result<bool> {
    let what = item_route("DELETE", id);
    let resp = self
      .client
      .delete(self.url(&format!("/persons/{id}")))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    decode(resp, &what).await
  }
}

/// Label for a request on a single person, e.g. `GET /persons/3`.
fn item_route(method: &str, id: PersonId) -> String {
  format!("{method} /persons/{id}")
}

async fn decode<T: serde::de::DeserializeOwned>(
  resp: Response,
  what: &str,
) -> Result<T> {
  let status = resp.status();
  tracing::debug!(%status, "{what}");
  if !status.is_success() {
    let body = resp.text().await.unwrap_or_default();
    return Err(anyhow!("{what} → {status}: {body}"));
  }
  resp
    .json()
    .await
    .with_context(|| format!("deserialising response to {what}"))
}
