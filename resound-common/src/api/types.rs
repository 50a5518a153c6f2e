//! Shared API request/response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name → validation message, ordered for stable output
pub type FieldErrors = BTreeMap<String, String>;

// ========================================
// Success Bodies
// ========================================

/// `{"id": n}` returned by create/upload endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

/// `{"ids": [...]}` returned by bulk delete endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedIds {
    pub ids: Vec<i64>,
}

// ========================================
// Error Envelope
// ========================================

/// Uniform error body used by every endpoint of every service
///
/// `error_code` carries the HTTP status as a string ("400", "404", ...).
///
/// # Examples
///
/// ```
/// use resound_common::api::ErrorEnvelope;
///
/// let body = ErrorEnvelope::new("Resource with ID=3 not found", 404);
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["errorCode"], "404");
/// assert!(json.get("details").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error_message: String,
    pub error_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            error_message: message.into(),
            error_code: status.to_string(),
            details: None,
        }
    }

    /// Attach per-field validation messages
    pub fn with_details(mut self, details: FieldErrors) -> Self {
        self.details = Some(details);
        self
    }
}
