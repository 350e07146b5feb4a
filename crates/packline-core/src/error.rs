//! Validation error types for `packline-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// An identifier was absent (or blank) in the request shape itself.
  #[error("{0} ID is required.")]
  MissingId(&'static str),

  #[error("Missing required fields: {}.", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("invalid {field}: {reason}")]
  InvalidField {
    field:  &'static str,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
