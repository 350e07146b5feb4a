//! Error type for `packline-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored integer column does not fit its domain type.
  #[error("column {column} holds out-of-range value {value}")]
  OutOfRange {
    column: &'static str,
    value:  i64,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
