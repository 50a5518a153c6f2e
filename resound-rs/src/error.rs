//! Error types for resound-rs
//!
//! Every failure that reaches a handler is rendered as the shared
//! [`ErrorEnvelope`]. Catalog propagation failures are absent here:
//! they end at the propagator (see [`crate::catalog::PropagationOutcome`]).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resound_common::api::ErrorEnvelope;
use resound_common::CsvIdError;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bytes are empty or not a supported audio container (400)
    #[error("{0}")]
    InvalidAudioData(String),

    /// Malformed comma-separated identifier list (400)
    #[error(transparent)]
    InvalidCsvFormat(#[from] CsvIdError),

    /// No resource with this identifier (404)
    #[error("Resource with ID={0} not found")]
    ResourceNotFound(i64),

    /// Path or query parameter of the wrong type (400)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Upload with a content type other than audio/mpeg (400)
    #[error("Invalid file format: {0}. Only MP3 files are allowed")]
    UnsupportedMediaType(String),

    /// Upload body larger than the configured limit (413)
    #[error("File size exceeds the maximum allowed size of {0} bytes")]
    PayloadTooLarge(usize),

    /// No route matches the request path (404)
    #[error("No endpoint for {0}")]
    EndpointNotFound(String),

    /// Route exists but not for this method (405)
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    /// Storage failure (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ResourceNotFound(_) | ApiError::EndpointNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidAudioData(_)
            | ApiError::InvalidCsvFormat(_)
            | ApiError::InvalidParameter(_)
            | ApiError::UnsupportedMediaType(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal causes are logged, never echoed to the caller
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            "An internal server error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorEnvelope::new(message, status.as_u16()))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
