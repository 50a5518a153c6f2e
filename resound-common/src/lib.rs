//! # Resound Common Library
//!
//! Shared code for the Resound microservices:
//! - Error type shared by infrastructure code
//! - Configuration loading and root folder resolution
//! - SQLite pool initialization
//! - Comma-separated identifier parsing used by bulk delete endpoints
//! - API response types, including the uniform error envelope

pub mod api;
pub mod config;
pub mod csv_ids;
pub mod db;
pub mod error;

pub use csv_ids::{parse_csv_ids, CsvIdError, MAX_CSV_LENGTH};
pub use error::{Error, Result};
