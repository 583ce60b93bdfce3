//! JSON REST API for the carbon emission ledger.
//!
//! Exposes an axum [`Router`] backed by any [`EmissionStore`]. Auth, TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", carbon_api::api_router(Arc::new(store)))
//! ```

pub mod activity;
pub mod error;
pub mod query;
pub mod reference;
pub mod reports;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use carbon_core::store::EmissionStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// Every request is traced; the returned `Router<()>` can be nested into
/// any parent router regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EmissionStore + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    // Activity
    .route("/activities", post(activity::create_activity::<S>))
    .route("/offsets", post(activity::create_offset::<S>))
    .route("/enrollments", post(activity::enroll::<S>))
    // Reference data
    .route("/factors", get(reference::factors::<S>))
    .route("/suggestions/{kind}", get(reference::suggestions))
    // Reports
    .route("/reports/{user_id}", get(reports::get_report::<S>))
    .route("/aggregate/{user_id}", get(reports::get_aggregate::<S>))
    // Ad-hoc SQL
    .route("/query", post(query::run::<S>))
    .route("/catalog", get(query::list))
    .route("/catalog/{name}", post(query::run_canned::<S>))
    .with_state(store)
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use carbon_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tempfile::TempDir;
  use tower::ServiceExt as _;

  use super::*;

  async fn app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("carbon.db"));
    store.initialize().await.unwrap();
    (dir, api_router(Arc::new(store)))
  }

  async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(b) => builder
        .header("content-type", "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
  }

  #[tokio::test]
  async fn lists_seeded_users() {
    let (_dir, app) = app().await;
    let (status, body) = send(app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0]["full_name"], "John Doe");
  }

  #[tokio::test]
  async fn blank_user_field_is_bad_request() {
    let (_dir, app) = app().await;
    let body = json!({ "full_name": "  ", "email": "x@example.com", "location": "Reno" });
    let (status, body) = send(app, "POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Full name is required"));
  }

  #[tokio::test]
  async fn report_for_seeded_user() {
    let (_dir, app) = app().await;
    let (status, body) =
      send(app, "GET", "/reports/1?from=2023-01-01&to=2023-03-31", None).await;
    assert_eq!(status, StatusCode::OK);
    let net = body["summary"]["net_emissions"].as_f64().unwrap();
    assert!((net - 1487.329).abs() < 1e-9);
    assert_eq!(body["recommendation"]["dominant"], "industrial");
  }

  #[tokio::test]
  async fn report_for_missing_user_is_not_found() {
    let (_dir, app) = app().await;
    let (status, _) = send(app, "GET", "/reports/9999?from=2023-01-01&to=2023-03-31", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn inverted_window_is_bad_request() {
    let (_dir, app) = app().await;
    let (status, _) = send(app, "GET", "/aggregate/1?from=2023-03-31&to=2023-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn activity_accepts_numeric_or_text_amounts() {
    let (_dir, app) = app().await;
    let numeric = json!({
      "kind": "energy", "user_id": 2, "label": "Solar", "amount": 12.5, "date": "2023-03-02"
    });
    let (status, body) = send(app.clone(), "POST", "/activities", Some(numeric)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 9);

    let text = json!({ "user_id": 2, "label": "Tree Planting", "amount": "oops", "date": "2023-03-02" });
    let (status, _) = send(app, "POST", "/offsets", Some(text)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn activity_for_unknown_user_is_a_query_error() {
    let (_dir, app) = app().await;
    let body = json!({
      "kind": "waste", "user_id": 9999, "label": "Paper", "amount": 1, "date": "2023-03-02"
    });
    let (status, _) = send(app, "POST", "/activities", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn ad_hoc_query_round_trip() {
    let (_dir, app) = app().await;
    let (status, body) =
      send(app.clone(), "POST", "/query", Some(json!({ "sql": "SELECT 1 AS one" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "rows");
    assert_eq!(body["columns"], json!(["one"]));
    assert_eq!(body["rows"], json!([[1]]));

    let (status, body) =
      send(app, "POST", "/query", Some(json!({ "sql": "SELEC nonsense" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("syntax error"));
  }

  #[tokio::test]
  async fn catalog_lists_and_runs_by_name() {
    let (_dir, app) = app().await;
    let (status, body) = send(app.clone(), "GET", "/catalog?catalog=basic", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Show All Users");

    let (status, body) = send(app.clone(), "POST", "/catalog/Show%20All%20Users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["rows"].as_array().unwrap().len(), 5);

    let (status, _) = send(app, "POST", "/catalog/Nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn suggestions_by_kind() {
    let (_dir, app) = app().await;
    let (status, body) = send(app, "GET", "/suggestions/transport", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], "Car");
  }
}
