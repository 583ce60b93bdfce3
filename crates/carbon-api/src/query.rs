//! Ad-hoc SQL and the canned catalogs.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/query` | Body: `{"sql":"SELECT ..."}` |
//! | `GET`  | `/catalog` | Optional `?catalog=basic\|analytical` |
//! | `POST` | `/catalog/{name}` | Run a canned query by exact name |
//!
//! Each request runs with a fresh [`QueryRunner`]; history is a per-session
//! concept and HTTP requests share none.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use carbon_core::{
  catalog::{self, CannedQuery, Catalog},
  query::{Outcome, QueryRunner},
  store::EmissionStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct QueryBody {
  pub sql: String,
}

/// `POST /query`
pub async fn run<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<QueryBody>,
) -> Result<Json<Outcome>, ApiError>
where
  S: EmissionStore,
{
  let mut runner = QueryRunner::new(store.as_ref());
  let outcome = runner.run(&body.sql).await.map_err(ApiError::store)?;
  Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
  pub catalog: Option<Catalog>,
}

/// `GET /catalog[?catalog=<which>]`
pub async fn list(Query(params): Query<CatalogParams>) -> Json<Vec<&'static CannedQuery>> {
  let queries = match params.catalog {
    Some(which) => catalog::catalog(which).iter().collect(),
    None => catalog::all().collect(),
  };
  Json(queries)
}

#[derive(Debug, Serialize)]
pub struct CannedOutcome {
  pub query:   &'static CannedQuery,
  pub outcome: Outcome,
}

/// `POST /catalog/{name}`
pub async fn run_canned<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<CannedOutcome>, ApiError>
where
  S: EmissionStore,
{
  let mut runner = QueryRunner::new(store.as_ref());
  let (query, outcome) = runner.run_canned(&name).await.map_err(ApiError::store)?;
  Ok(Json(CannedOutcome { query, outcome }))
}
