//! Best-effort catalog propagation
//!
//! The propagator pushes extracted metadata to the song service and retracts
//! it after deletes. It never returns an error: each call yields a
//! [`PropagationOutcome`] that callers may log but never turn into a request
//! failure. Calls are at-most-once with no retry.

pub mod client;

pub use client::{CatalogClient, HttpCatalogClient, PropagationError};

use crate::audio::SongMetadata;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one propagation attempt
#[derive(Debug)]
#[must_use]
pub enum PropagationOutcome {
    /// The catalog accepted the call
    Delivered,
    /// Nothing to send
    Skipped,
    /// The call failed and was recorded; the triggering operation stands
    Failed(PropagationError),
}

impl PropagationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PropagationOutcome::Delivered)
    }
}

/// Log-and-swallow wrapper around a [`CatalogClient`]
#[derive(Clone)]
pub struct CatalogPropagator {
    client: Arc<dyn CatalogClient>,
}

impl CatalogPropagator {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Send metadata for a freshly stored resource
    pub async fn publish(&self, metadata: &SongMetadata) -> PropagationOutcome {
        match self.client.create_song(metadata).await {
            Ok(()) => {
                info!(resource_id = metadata.id, "Saved song metadata to catalog");
                PropagationOutcome::Delivered
            }
            Err(e) => {
                warn!(
                    resource_id = metadata.id,
                    error = %e,
                    "Failed to save song metadata to catalog"
                );
                PropagationOutcome::Failed(e)
            }
        }
    }

    /// Remove catalog entries for deleted resources with one bulk call
    pub async fn retract(&self, ids: &[i64]) -> PropagationOutcome {
        if ids.is_empty() {
            return PropagationOutcome::Skipped;
        }

        match self.client.delete_songs(ids).await {
            Ok(()) => {
                info!(resource_ids = ?ids, "Deleted song metadata from catalog");
                PropagationOutcome::Delivered
            }
            Err(e) => {
                warn!(
                    resource_ids = ?ids,
                    error = %e,
                    "Failed to delete song metadata from catalog"
                );
                PropagationOutcome::Failed(e)
            }
        }
    }
}
