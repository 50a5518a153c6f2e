//! HTTP API handlers for resound-rs

pub mod fallback;
pub mod health;
pub mod resources;

pub use fallback::{endpoint_not_found, method_not_allowed};
pub use health::health_routes;
pub use resources::resource_routes;
