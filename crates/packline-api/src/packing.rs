//! Handler for `POST /packing`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use packline_core::{RecordService, input::RawPackingInput, store::RecordStore};

use crate::{envelope::Envelope, error::ApiError};

/// `POST /packing` — body: `{datetime, pic, weight, qtyA, qtyB, qtyC, reject}`.
/// Returns 201 + the enveloped record.
pub async fn create<S>(
  State(service): State<RecordService<S>>,
  body: Result<Json<RawPackingInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let Json(input) = body?;
  let record = service
    .create_packing_record(input)
    .await
    .map_err(ApiError::service("Failed to create packing record."))?;
  Ok((StatusCode::CREATED, Json(Envelope::ok(record))))
}
