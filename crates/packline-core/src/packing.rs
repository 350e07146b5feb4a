//! Packing records — one measured packing run each.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The validated, storable body of a packing record.
///
/// Every field is mandatory; an update replaces all of them at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingFields {
  /// When the packing run happened (client-supplied, not insertion time).
  pub datetime: DateTime<Utc>,
  /// The operator responsible for the run, as free text.
  pub pic:      String,
  /// Net weight; finite and non-negative.
  pub weight:   f64,
  pub qty_a:    u32,
  pub qty_b:    u32,
  pub qty_c:    u32,
  /// Rejected weight or count; finite and non-negative.
  pub reject:   f64,
}

/// A persisted packing record.
///
/// Serialises flat: `{"id", "datetime", "pic", "weight", "qtyA", "qtyB",
/// "qtyC", "reject"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingRecord {
  pub id:     Uuid,
  #[serde(flatten)]
  pub fields: PackingFields,
}
