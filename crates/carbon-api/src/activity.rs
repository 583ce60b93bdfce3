//! Handlers for logging activity, offsets and program enrollments.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/activities`  | Body: `{"kind":"transport","user_id":1,"label":"Car","amount":12.5,"date":"2023-03-01"}` |
//! | `POST` | `/offsets`     | As above without `kind` |
//! | `POST` | `/enrollments` | Body: `{"user_id":1,"program_id":2,"date":"2023-03-01"}` |
//!
//! `amount` may be sent as a JSON number or as text; text goes through the
//! same numeric validation a form field would.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use carbon_core::{
  category::RecordKind,
  record::UserId,
  request::{ActivityForm, EnrollmentForm},
  store::EmissionStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Amount {
  Number(f64),
  Text(String),
}

impl Amount {
  fn into_text(self) -> String {
    match self {
      Amount::Number(n) => n.to_string(),
      Amount::Text(s) => s,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ActivityBody {
  pub kind:    RecordKind,
  #[serde(flatten)]
  pub entry:   EntryBody,
}

#[derive(Debug, Deserialize)]
pub struct EntryBody {
  pub user_id: UserId,
  pub label:   String,
  pub amount:  Amount,
  pub date:    String,
}

#[derive(Debug, Serialize)]
pub struct Created {
  pub id: i64,
}

async fn record<S>(store: &S, kind: RecordKind, entry: EntryBody) -> Result<Created, ApiError>
where
  S: EmissionStore,
{
  let form = ActivityForm {
    kind,
    user_id: entry.user_id,
    label: entry.label,
    amount: entry.amount.into_text(),
    date: entry.date,
  };
  let input = form.validate().map_err(ApiError::store)?;
  let id = store.record_activity(input).await.map_err(ApiError::store)?;
  Ok(Created { id })
}

/// `POST /activities`
pub async fn create_activity<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ActivityBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EmissionStore,
{
  let created = record(store.as_ref(), body.kind, body.entry).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /offsets`
pub async fn create_offset<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<EntryBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EmissionStore,
{
  let created = record(store.as_ref(), RecordKind::Offset, body).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /enrollments`
pub async fn enroll<S>(
  State(store): State<Arc<S>>,
  Json(form): Json<EnrollmentForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EmissionStore,
{
  let enrollment = form.validate().map_err(ApiError::store)?;
  store.enroll(enrollment.clone()).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(enrollment)))
}
