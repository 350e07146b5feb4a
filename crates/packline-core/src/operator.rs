//! Operator — the person in charge ("PIC") of a packing run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named operator. Names are not unique; only `id` identifies an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
  pub id:   Uuid,
  pub name: String,
}
