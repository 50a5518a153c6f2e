//! resound-ss library - Song service
//!
//! Catalog of descriptive song metadata, keyed by the resource identifier the
//! resource service assigned.

pub mod api;
pub mod db;
pub mod error;
pub mod validation;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use crate::db::SongStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub songs: SongStore,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(songs: SongStore) -> Self {
        Self {
            songs,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::song_routes())
        .merge(api::health_routes())
        .fallback(api::endpoint_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
