//! Read-only reference data.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/factors` | Emission factors, by id |
//! | `GET`  | `/suggestions/{kind}` | Type labels offered for a record kind |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use carbon_core::{category::RecordKind, record::EmissionFactor, store::EmissionStore};

use crate::error::ApiError;

/// `GET /factors`
pub async fn factors<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<EmissionFactor>>, ApiError>
where
  S: EmissionStore,
{
  let factors = store.emission_factors().await.map_err(ApiError::store)?;
  Ok(Json(factors))
}

/// `GET /suggestions/{kind}`
pub async fn suggestions(Path(kind): Path<RecordKind>) -> Json<&'static [&'static str]> {
  Json(kind.suggestions())
}
