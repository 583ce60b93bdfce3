//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | All users, by id |
//! | `POST` | `/users` | Body: `{"full_name":..,"email":..,"location":..}` |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use carbon_core::{record::User, request::UserForm, store::EmissionStore};

use crate::error::ApiError;

/// `GET /users`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<User>>, ApiError>
where
  S: EmissionStore,
{
  let users = store.list_users().await.map_err(ApiError::store)?;
  Ok(Json(users))
}

/// `POST /users`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(form): Json<UserForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EmissionStore,
{
  let input = form.validate().map_err(ApiError::store)?;
  let user = store.add_user(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(user)))
}
