//! Shared test helpers for resound-rs integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use resound_rs::audio::SongMetadata;
use resound_rs::catalog::{CatalogClient, CatalogPropagator, PropagationError};
use resound_rs::db::ResourceStore;
use resound_rs::pipeline::ResourcePipeline;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};

/// Catalog double that records every call and optionally fails them
#[derive(Default)]
pub struct RecordingCatalog {
    pub created: Mutex<Vec<SongMetadata>>,
    pub deleted: Mutex<Vec<Vec<i64>>>,
    pub fail: bool,
}

impl RecordingCatalog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<SongMetadata> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<Vec<i64>> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for RecordingCatalog {
    async fn create_song(&self, metadata: &SongMetadata) -> Result<(), PropagationError> {
        self.created.lock().unwrap().push(metadata.clone());
        if self.fail {
            return Err(PropagationError::Status {
                status: 500,
                body: "catalog down".to_string(),
            });
        }
        Ok(())
    }

    async fn delete_songs(&self, ids: &[i64]) -> Result<(), PropagationError> {
        self.deleted.lock().unwrap().push(ids.to_vec());
        if self.fail {
            return Err(PropagationError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Pipeline over an in-memory database and the given catalog client
pub async fn pipeline_with(catalog: Arc<dyn CatalogClient>) -> ResourcePipeline {
    pipeline_and_pool(catalog).await.0
}

/// Like [`pipeline_with`], also handing back the pool for direct SQL
pub async fn pipeline_and_pool(catalog: Arc<dyn CatalogClient>) -> (ResourcePipeline, SqlitePool) {
    let pool = resound_common::db::open_in_memory().await.unwrap();
    resound_rs::db::init_tables(&pool).await.unwrap();
    let pipeline = ResourcePipeline::new(
        ResourceStore::new(pool.clone()),
        CatalogPropagator::new(catalog),
    );
    (pipeline, pool)
}

/// ID3v2.3 tag with Latin-1 text frames followed by silent MPEG-1 Layer III
/// frames (128 kbps, 44.1 kHz)
pub fn tagged_mp3(frames: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (id, text) in frames {
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        body.extend_from_slice(&[0x00, 0x00, 0x00]);
        body.extend_from_slice(text.as_bytes());
    }

    let size = body.len() as u32;
    let mut data = b"ID3".to_vec();
    data.extend_from_slice(&[0x03, 0x00, 0x00]);
    data.extend_from_slice(&[
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]);
    data.extend_from_slice(&body);

    let mut frame = vec![0u8; 417];
    frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
    data.extend(frame.repeat(40));
    data
}

/// Ten bytes that pass the sniff check but hold no parsable stream
pub fn sniff_only_bytes() -> Vec<u8> {
    b"ID3\x00\x00\x00\x00\x00\x00\x00".to_vec()
}
