//! Handlers for `/pic` (operator) endpoints.
//!
//! | Method   | Path       | Notes |
//! |----------|------------|-------|
//! | `GET`    | `/pic`     | Enveloped list |
//! | `POST`   | `/pic`     | Body: `{"name":"..."}`; returns 201 |
//! | `DELETE` | `/pic/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use packline_core::{
  RecordService, input::RawOperatorInput, operator::Operator, store::RecordStore,
};

use crate::{envelope::Envelope, error::ApiError};

/// `GET /pic`
pub async fn list<S>(
  State(service): State<RecordService<S>>,
) -> Result<Json<Envelope<Vec<Operator>>>, ApiError>
where
  S: RecordStore + 'static,
{
  let operators = service
    .list_operators()
    .await
    .map_err(ApiError::service("Failed to list operators."))?;
  Ok(Json(Envelope::ok(operators)))
}

/// `POST /pic` — body: `{"name":"Bob"}`
pub async fn create<S>(
  State(service): State<RecordService<S>>,
  body: Result<Json<RawOperatorInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let Json(input) = body?;
  let operator = service
    .create_operator(input)
    .await
    .map_err(ApiError::service("Failed to create operator."))?;
  Ok((StatusCode::CREATED, Json(Envelope::ok(operator))))
}

/// `DELETE /pic/:id`
pub async fn delete_one<S>(
  State(service): State<RecordService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError>
where
  S: RecordStore + 'static,
{
  service
    .delete_operator(Some(&id))
    .await
    .map_err(ApiError::service("Failed to delete operator."))?;
  Ok(Json(Envelope::done()))
}
