//! The `{success, data|error}` response wrapper.

use serde::Serialize;

/// JSON envelope used by most endpoints.
///
/// `data` and `error` are omitted when absent, so a bare confirmation
/// serialises as `{"success":true}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self { success: true, data: Some(data), error: None }
  }

  pub fn failure(error: impl Into<String>) -> Self {
    Self { success: false, data: None, error: Some(error.into()) }
  }
}

impl Envelope<()> {
  /// `{"success":true}` with no payload.
  pub fn done() -> Self {
    Self { success: true, data: None, error: None }
  }
}
