//! API types shared by the Resound services
//!
//! Pure serde types only; each service wraps them with its own axum
//! `IntoResponse` implementation.

pub mod types;

pub use types::{CreatedId, DeletedIds, ErrorEnvelope, FieldErrors};
