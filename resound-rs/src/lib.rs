//! resound-rs library - Resource service
//!
//! Stores uploaded MP3 files and keeps the song catalog in step with them on
//! a best-effort basis.

pub mod api;
pub mod audio;
pub mod catalog;
pub mod db;
pub mod error;
pub mod pipeline;

pub use crate::error::{ApiError, ApiResult};

use axum::{extract::DefaultBodyLimit, Router};
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use crate::pipeline::ResourcePipeline;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ResourcePipeline,
    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: ResourcePipeline, max_upload_bytes: usize) -> Self {
        Self {
            pipeline,
            max_upload_bytes,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .merge(api::resource_routes())
        .merge(api::health_routes())
        .fallback(api::endpoint_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
