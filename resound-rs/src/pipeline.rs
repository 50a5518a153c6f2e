//! Upload, retrieval and bulk deletion of audio resources
//!
//! Input problems (bad bytes, bad id list, unknown id on lookup) fail the
//! request. Everything after the resource row is committed (extraction and
//! catalog propagation) is best-effort: its failures are logged here and the
//! stored resource is never rolled back.

use crate::audio::{validate_audio_data, MetadataExtractor};
use crate::catalog::{CatalogPropagator, PropagationOutcome};
use crate::db::ResourceStore;
use crate::error::{ApiError, ApiResult};
use resound_common::parse_csv_ids;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Orchestrates validator, store, extractor and propagator
#[derive(Clone)]
pub struct ResourcePipeline {
    store: ResourceStore,
    extractor: MetadataExtractor,
    propagator: CatalogPropagator,
}

impl ResourcePipeline {
    pub fn new(store: ResourceStore, propagator: CatalogPropagator) -> Self {
        Self {
            store,
            extractor: MetadataExtractor::new(),
            propagator,
        }
    }

    /// Validate, persist, then try to catalog the upload
    ///
    /// Returns the new identifier once the insert has committed, regardless of
    /// what happens to the metadata.
    pub async fn upload(&self, data: &[u8]) -> ApiResult<i64> {
        validate_audio_data(data)?;

        let id = self.store.insert(data).await?;
        info!(resource_id = id, size = data.len(), "Stored resource");

        self.sync_metadata(id, data).await;

        Ok(id)
    }

    /// Extract and publish; never fails the caller
    ///
    /// Parsing runs on the blocking pool. A parser panic ends there as a
    /// `JoinError` and is treated like any other extraction failure.
    async fn sync_metadata(&self, id: i64, data: &[u8]) {
        let extractor = self.extractor;
        let owned = data.to_vec();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(id, &owned)).await;

        let metadata = match extracted {
            Ok(Ok(metadata)) => metadata,
            Ok(Err(e)) => {
                warn!(resource_id = id, error = %e, "Failed to process metadata for resource");
                return;
            }
            Err(e) => {
                warn!(resource_id = id, error = %e, "Metadata extraction task aborted");
                return;
            }
        };

        match self.propagator.publish(&metadata).await {
            PropagationOutcome::Failed(_) => {
                debug!(resource_id = id, "Resource stored without catalog entry")
            }
            PropagationOutcome::Delivered | PropagationOutcome::Skipped => {}
        }
    }

    pub async fn retrieve(&self, id: i64) -> ApiResult<Vec<u8>> {
        self.store
            .find(id)
            .await?
            .ok_or(ApiError::ResourceNotFound(id))
    }

    /// Delete every listed resource that exists and retract their metadata
    ///
    /// Unknown identifiers are skipped silently. The result lists the ids that
    /// were actually removed, in input order, each at most once. Each delete
    /// commits on its own, so when the store fails partway through, the rows
    /// already removed are still retracted before the error is returned.
    pub async fn delete(&self, csv_ids: &str) -> ApiResult<Vec<i64>> {
        let ids = parse_csv_ids(csv_ids)?;

        let mut seen = HashSet::with_capacity(ids.len());
        let mut deleted = Vec::new();
        let mut failure = None;
        for id in ids {
            if !seen.insert(id) {
                continue;
            }
            match self.store.delete(id).await {
                Ok(true) => deleted.push(id),
                Ok(false) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if !deleted.is_empty() {
            info!(resource_ids = ?deleted, "Deleted resources");
            self.retract_metadata(&deleted).await;
        }

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(deleted),
        }
    }

    /// Retract catalog entries; never fails the caller
    async fn retract_metadata(&self, ids: &[i64]) {
        match self.propagator.retract(ids).await {
            PropagationOutcome::Failed(_) => {
                debug!(resource_ids = ?ids, "Resources deleted with catalog entries left behind")
            }
            PropagationOutcome::Delivered | PropagationOutcome::Skipped => {}
        }
    }
}
