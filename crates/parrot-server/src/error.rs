//! Boundary error taxonomy.
//!
//! Everything here is an HTTP-layer concern; none of these variants touch
//! engine state. The engine's own "not found" result surfaces as
//! [`ApiError::NotFound`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unsupported audio format: {0}. Supported formats: M4A, WAV")]
    UnsupportedFormat(String),

    #[error("No audio file provided")]
    MissingFile,

    #[error("Malformed upload request: {0}")]
    MalformedRequest(String),

    #[error("Upload not found")]
    NotFound,

    /// A simulated upload-acceptance failure drawn by the randomizer.
    #[error("{message}")]
    SimulatedFault { status: StatusCode, message: String },

    /// A simulated stall long enough to trip client timeouts.
    #[error("Gateway timeout")]
    GatewayTimeout,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedFormat(_)
            | ApiError::MissingFile
            | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::SimulatedFault { status, .. } => *status,
            ApiError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
