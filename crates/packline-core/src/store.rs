//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `packline-store-sqlite`). The record
//! service depends on this abstraction, not on any concrete backend. Every
//! method is a single-row operation; consistency is whatever the backend
//! natively provides.

use std::future::Future;

use uuid::Uuid;

use crate::{
  operator::Operator,
  packing::{PackingFields, PackingRecord},
};

/// Abstraction over a Packline storage backend.
///
/// Identifiers are generated by the store, exactly once, at creation.
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Operators ─────────────────────────────────────────────────────────

  /// Persist a new operator and return it with its generated id.
  fn add_operator(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Operator, Self::Error>> + Send + '_;

  /// List every operator in insertion order.
  fn list_operators(
    &self,
  ) -> impl Future<Output = Result<Vec<Operator>, Self::Error>> + Send + '_;

  /// Delete an operator. Returns `false` if no operator had that id.
  fn delete_operator(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Packing records ───────────────────────────────────────────────────

  /// Persist a new packing record and return it with its generated id.
  fn add_packing_record(
    &self,
    fields: PackingFields,
  ) -> impl Future<Output = Result<PackingRecord, Self::Error>> + Send + '_;

  /// List every packing record in insertion order.
  fn list_packing_records(
    &self,
  ) -> impl Future<Output = Result<Vec<PackingRecord>, Self::Error>> + Send + '_;

  /// Retrieve a packing record by id. Returns `None` if not found.
  fn get_packing_record(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PackingRecord>, Self::Error>> + Send + '_;

  /// Overwrite every field of an existing record.
  ///
  /// Returns the updated record, or `None` (with nothing written) if no
  /// record had that id.
  fn replace_packing_record(
    &self,
    id: Uuid,
    fields: PackingFields,
  ) -> impl Future<Output = Result<Option<PackingRecord>, Self::Error>> + Send + '_;

  /// Delete a packing record. Returns `false` if no record had that id.
  fn delete_packing_record(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
