//! The record service: validation in front of single-row store operations.
//!
//! Every operation normalises its raw input first and only then touches the
//! store, so a rejected request never causes a write.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  input::{RawOperatorInput, RawPackingInput, parse_id},
  operator::Operator,
  packing::PackingRecord,
  store::RecordStore,
};

/// Entity names used in identifier error messages.
const REPORT: &str = "Report";
const OPERATOR: &str = "Operator";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a record service operation failed.
#[derive(Debug, Error)]
pub enum ServiceError {
  /// A required identifier or field was absent or malformed.
  #[error("{0}")]
  BadRequest(String),

  /// The identifier does not resolve to a stored row.
  #[error("{0}")]
  NotFound(String),

  /// The storage backend failed.
  #[error("storage failure: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::Error> for ServiceError {
  fn from(e: crate::Error) -> Self {
    warn!(error = %e, "rejected input");
    ServiceError::BadRequest(e.to_string())
  }
}

impl ServiceError {
  fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ServiceError::Storage(Box::new(e))
  }

  fn not_found(entity: &str) -> Self {
    ServiceError::NotFound(format!("{entity} not found."))
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Validates client input and forwards it to a [`RecordStore`].
///
/// The store handle is injected once at startup and shared by every request;
/// cloning the service only clones the `Arc`.
pub struct RecordService<S> {
  store: Arc<S>,
}

impl<S> Clone for RecordService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: RecordStore> RecordService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The underlying store.
  pub fn store(&self) -> &S { &self.store }

  /// Resolve an id, mapping "present but can never match" to `NotFound`.
  fn resolve_id(entity: &'static str, raw: Option<&str>) -> Result<Uuid, ServiceError> {
    parse_id(entity, raw)?.ok_or_else(|| ServiceError::not_found(entity))
  }

  // ── Operators ─────────────────────────────────────────────────────────

  pub async fn create_operator(
    &self,
    input: RawOperatorInput,
  ) -> Result<Operator, ServiceError> {
    let name = input.normalize()?;
    let operator = self
      .store
      .add_operator(name)
      .await
      .map_err(ServiceError::storage)?;
    debug!(id = %operator.id, "created operator");
    Ok(operator)
  }

  pub async fn list_operators(&self) -> Result<Vec<Operator>, ServiceError> {
    self.store.list_operators().await.map_err(ServiceError::storage)
  }

  pub async fn delete_operator(&self, id: Option<&str>) -> Result<(), ServiceError> {
    let id = Self::resolve_id(OPERATOR, id)?;
    let deleted = self
      .store
      .delete_operator(id)
      .await
      .map_err(ServiceError::storage)?;
    if !deleted {
      return Err(ServiceError::not_found(OPERATOR));
    }
    debug!(%id, "deleted operator");
    Ok(())
  }

  // ── Packing records ───────────────────────────────────────────────────

  pub async fn create_packing_record(
    &self,
    input: RawPackingInput,
  ) -> Result<PackingRecord, ServiceError> {
    let fields = input.normalize()?;
    let record = self
      .store
      .add_packing_record(fields)
      .await
      .map_err(ServiceError::storage)?;
    debug!(id = %record.id, "created packing record");
    Ok(record)
  }

  pub async fn list_packing_records(&self) -> Result<Vec<PackingRecord>, ServiceError> {
    self
      .store
      .list_packing_records()
      .await
      .map_err(ServiceError::storage)
  }

  pub async fn get_packing_record(
    &self,
    id: Option<&str>,
  ) -> Result<PackingRecord, ServiceError> {
    let id = Self::resolve_id(REPORT, id)?;
    self
      .store
      .get_packing_record(id)
      .await
      .map_err(ServiceError::storage)?
      .ok_or_else(|| ServiceError::not_found(REPORT))
  }

  /// Replace every field of a record.
  ///
  /// The id and all seven fields must be present; a partial body is rejected
  /// wholesale before the store is consulted.
  pub async fn update_packing_record(
    &self,
    id: Option<&str>,
    input: RawPackingInput,
  ) -> Result<PackingRecord, ServiceError> {
    let id = parse_id(REPORT, id)?;
    let fields = input.normalize()?;
    let id = id.ok_or_else(|| ServiceError::not_found(REPORT))?;

    let record = self
      .store
      .replace_packing_record(id, fields)
      .await
      .map_err(ServiceError::storage)?
      .ok_or_else(|| ServiceError::not_found(REPORT))?;
    debug!(%id, "replaced packing record");
    Ok(record)
  }

  pub async fn delete_packing_record(&self, id: Option<&str>) -> Result<(), ServiceError> {
    let id = Self::resolve_id(REPORT, id)?;
    let deleted = self
      .store
      .delete_packing_record(id)
      .await
      .map_err(ServiceError::storage)?;
    if !deleted {
      return Err(ServiceError::not_found(REPORT));
    }
    debug!(%id, "deleted packing record");
    Ok(())
  }
}
