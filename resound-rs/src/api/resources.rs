//! Resource endpoints
//!
//! - `POST /resources` (body: `audio/mpeg` bytes) → `{"id": n}`
//! - `GET /resources/:id` → raw bytes
//! - `DELETE /resources?id=1,2` → `{"ids": [...]}`

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use resound_common::api::{CreatedId, DeletedIds};
use serde::Deserialize;
use tracing::debug;

use crate::api::method_not_allowed;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const AUDIO_MPEG: &str = "audio/mpeg";

/// Query parameters for bulk delete
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Comma-separated identifiers
    pub id: Option<String>,
}

/// POST /resources
pub async fn upload_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<CreatedId>> {
    let body = body.map_err(|rejection| body_error(state.max_upload_bytes, rejection))?;
    require_audio_mpeg(&headers)?;

    let id = state.pipeline.upload(&body).await?;
    Ok(Json(CreatedId { id }))
}

/// GET /resources/:id
pub async fn get_resource(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidParameter("id".to_string()))?;

    let data = state.pipeline.retrieve(id).await?;
    Ok(([(header::CONTENT_TYPE, AUDIO_MPEG)], data))
}

/// DELETE /resources?id=...
pub async fn delete_resources(
    State(state): State<AppState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<Json<DeletedIds>> {
    let Query(query) = query.map_err(query_error)?;
    let ids = state
        .pipeline
        .delete(query.id.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(DeletedIds { ids }))
}

fn body_error(limit: usize, rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(limit)
    } else {
        debug!(error = %rejection, "Failed to read upload body");
        ApiError::InvalidAudioData("Failed to read upload body".to_string())
    }
}

fn query_error(rejection: QueryRejection) -> ApiError {
    debug!(error = %rejection, "Rejected delete query");
    ApiError::InvalidParameter("id".to_string())
}

fn require_audio_mpeg(headers: &HeaderMap) -> ApiResult<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match essence.as_deref() {
        Some(AUDIO_MPEG) => Ok(()),
        _ => Err(ApiError::UnsupportedMediaType(
            content_type.unwrap_or("unknown").to_string(),
        )),
    }
}

/// Build resource routes
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources",
            post(upload_resource)
                .delete(delete_resources)
                .fallback(method_not_allowed),
        )
        .route(
            "/resources/:id",
            get(get_resource).fallback(method_not_allowed),
        )
}
