//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use packline_core::ServiceError;
use thiserror::Error;

use crate::envelope::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// Storage failed. `message` is what the client sees; the source is only
  /// logged.
  #[error("{message}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Adapter for `map_err` that attaches the client-facing message used when
  /// the store fails.
  pub fn service(message: &'static str) -> impl FnOnce(ServiceError) -> ApiError {
    move |e| match e {
      ServiceError::BadRequest(m) => ApiError::BadRequest(m),
      ServiceError::NotFound(m) => ApiError::NotFound(m),
      ServiceError::Storage(source) => ApiError::Store { message, source },
    }
  }

  /// Human-readable message safe to show the client.
  pub fn client_message(&self) -> String {
    match self {
      ApiError::BadRequest(m) | ApiError::NotFound(m) => m.clone(),
      ApiError::Store { message, .. } => (*message).to_owned(),
    }
  }

  /// Log server-side detail for failures the client only sees generically.
  pub(crate) fn log(&self) {
    if let ApiError::Store { message, source } = self {
      tracing::error!(error = %source, "{message}");
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    self.log();
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(Envelope::<()>::failure(self.client_message()))).into_response()
  }
}
