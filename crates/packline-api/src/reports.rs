//! Handlers for `/reports` (packing record) endpoints.
//!
//! | Method   | Path           | Success shape | Failure shape |
//! |----------|----------------|---------------|---------------|
//! | `GET`    | `/reports`     | enveloped list | status-coded envelope |
//! | `PUT`    | `/reports`     | enveloped record | `200 {"success":false,"error"}` |
//! | `GET`    | `/reports/:id` | bare record | 400 / 404 / 500 |
//! | `PUT`    | `/reports/:id` | bare record | 400 / 404 / 500 |
//! | `DELETE` | `/reports/:id` | `{"success":true}` | 404 / 500 |
//!
//! The bulk-style `PUT /reports` keeps its flag-only failure shape and the
//! by-id routes answer with bare records; existing clients depend on both.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use packline_core::{
  RecordService,
  input::{RawPackingInput, RawPackingUpdate},
  packing::PackingRecord,
  store::RecordStore,
};

use crate::{envelope::Envelope, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /reports`
pub async fn list<S>(
  State(service): State<RecordService<S>>,
) -> Result<Json<Envelope<Vec<PackingRecord>>>, ApiError>
where
  S: RecordStore + 'static,
{
  let records = service
    .list_packing_records()
    .await
    .map_err(ApiError::service("Failed to list reports."))?;
  Ok(Json(Envelope::ok(records)))
}

// ─── Bulk-style update ────────────────────────────────────────────────────────

/// `PUT /reports` — body: `{id, datetime, pic, weight, qtyA, qtyB, qtyC, reject}`.
///
/// Always answers 200; failure is signalled only by `"success": false`.
pub async fn update_bulk<S>(
  State(service): State<RecordService<S>>,
  body: Result<Json<RawPackingUpdate>, JsonRejection>,
) -> Json<Envelope<PackingRecord>>
where
  S: RecordStore + 'static,
{
  let result = match body {
    Ok(Json(update)) => {
      let id = update.id_text();
      service
        .update_packing_record(id.as_deref(), update.fields)
        .await
        .map_err(ApiError::service("Failed to update report."))
    }
    Err(rejection) => Err(ApiError::from(rejection)),
  };

  match result {
    Ok(record) => Json(Envelope::ok(record)),
    Err(e) => {
      e.log();
      Json(Envelope::failure(e.client_message()))
    }
  }
}

// ─── By id ────────────────────────────────────────────────────────────────────

/// `GET /reports/:id` — the bare record, no envelope.
pub async fn get_one<S>(
  State(service): State<RecordService<S>>,
  Path(id): Path<String>,
) -> Result<Json<PackingRecord>, ApiError>
where
  S: RecordStore + 'static,
{
  let record = service
    .get_packing_record(Some(&id))
    .await
    .map_err(ApiError::service("Failed to fetch report."))?;
  Ok(Json(record))
}

/// `PUT /reports/:id` — full replace; all seven fields are required.
pub async fn update_one<S>(
  State(service): State<RecordService<S>>,
  Path(id): Path<String>,
  body: Result<Json<RawPackingInput>, JsonRejection>,
) -> Result<Json<PackingRecord>, ApiError>
where
  S: RecordStore + 'static,
{
  let Json(input) = body?;
  let record = service
    .update_packing_record(Some(&id), input)
    .await
    .map_err(ApiError::service("Failed to update report."))?;
  Ok(Json(record))
}

/// `DELETE /reports/:id`
pub async fn delete_one<S>(
  State(service): State<RecordService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError>
where
  S: RecordStore + 'static,
{
  service
    .delete_packing_record(Some(&id))
    .await
    .map_err(ApiError::service("Failed to delete report."))?;
  Ok(Json(Envelope::done()))
}
