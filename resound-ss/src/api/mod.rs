//! HTTP API handlers for resound-ss

pub mod fallback;
pub mod health;
pub mod songs;

pub use fallback::{endpoint_not_found, method_not_allowed};
pub use health::health_routes;
pub use songs::song_routes;
