//! Error types for resound-ss

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resound_common::api::{ErrorEnvelope, FieldErrors};
use resound_common::CsvIdError;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No catalog entry for this identifier (404)
    #[error("Song metadata for ID={0} not found")]
    SongNotFound(i64),

    /// Catalog entry already exists for this identifier (409)
    #[error("Metadata for resource ID={0} already exists")]
    AlreadyExists(i64),

    /// Malformed comma-separated identifier list (400)
    #[error(transparent)]
    InvalidCsvFormat(#[from] CsvIdError),

    /// Path or query parameter of the wrong type (400)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Body is not valid JSON for the expected shape (400)
    #[error("Invalid request body")]
    InvalidRequestBody,

    /// Body is not JSON at all (415)
    #[error("Invalid file format: {0}")]
    UnsupportedMediaType(String),

    /// Field-level validation failures (400)
    #[error("Validation error")]
    Validation(FieldErrors),

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
            ApiError::SongNotFound(_) | ApiError::EndpointNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidCsvFormat(_)
            | ApiError::InvalidParameter(_)
            | ApiError::InvalidRequestBody
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let envelope = match self {
            ApiError::Validation(details) => {
                ErrorEnvelope::new("Validation error", status.as_u16()).with_details(details)
            }
            ApiError::Database(ref e) => {
                error!("Request failed: {}", e);
                ErrorEnvelope::new("An internal server error occurred", status.as_u16())
            }
            other => ErrorEnvelope::new(other.to_string(), status.as_u16()),
        };

        (status, Json(envelope)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
