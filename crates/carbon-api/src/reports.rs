//! Handlers for reports and raw aggregations.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports/{user_id}`   | `?from=YYYY-MM-DD&to=YYYY-MM-DD`; 404 if the user does not exist |
//! | `GET`  | `/aggregate/{user_id}` | Same window; an unknown user yields zeros |
//!
//! Either bound may be omitted; the window then defaults to the current
//! year to date.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use carbon_core::{
  aggregate::{Aggregation, aggregate},
  record::UserId,
  report::{Report, report},
  request::{DateRange, ReportForm, ReportRequest, format_date},
  store::EmissionStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
  pub from: Option<String>,
  pub to:   Option<String>,
}

impl WindowParams {
  fn into_request(self, user_id: UserId) -> Result<ReportRequest, ApiError> {
    let default = DateRange::year_to_date(chrono::Local::now().date_naive());
    let form = ReportForm {
      user_id,
      from: self.from.unwrap_or_else(|| format_date(default.from)),
      to: self.to.unwrap_or_else(|| format_date(default.to)),
    };
    form.validate().map_err(ApiError::store)
  }
}

/// `GET /reports/{user_id}`
pub async fn get_report<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<UserId>,
  Query(params): Query<WindowParams>,
) -> Result<Json<Report>, ApiError>
where
  S: EmissionStore,
{
  let request = params.into_request(user_id)?;
  let report = report(store.as_ref(), request).await.map_err(ApiError::store)?;
  Ok(Json(report))
}

/// `GET /aggregate/{user_id}`
pub async fn get_aggregate<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<UserId>,
  Query(params): Query<WindowParams>,
) -> Result<Json<Aggregation>, ApiError>
where
  S: EmissionStore,
{
  let ReportRequest { user_id, range } = params.into_request(user_id)?;
  let aggregation = aggregate(store.as_ref(), user_id, range)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(aggregation))
}
