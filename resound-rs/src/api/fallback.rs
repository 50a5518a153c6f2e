//! Envelope responses for requests no handler accepts

use axum::http::{Method, Uri};

use crate::error::ApiError;

/// Router fallback for unmatched paths
pub async fn endpoint_not_found(uri: Uri) -> ApiError {
    ApiError::EndpointNotFound(uri.path().to_string())
}

/// Method router fallback for known paths with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}
