//! Song service HTTP client
//!
//! Two remote operations: `POST {base}/songs` with a JSON body and
//! `DELETE {base}/songs?id=1,2,3`. Every request is bounded by the client
//! timeout; no retries are attempted.

use crate::audio::SongMetadata;
use async_trait::async_trait;
use resound_common::csv_ids::join_csv_ids;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("resound-rs/", env!("CARGO_PKG_VERSION"));

/// Catalog call failures
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Client setup error: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for PropagationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PropagationError::Timeout(err.to_string())
        } else {
            PropagationError::Network(err.to_string())
        }
    }
}

/// Remote catalog operations consumed by the propagator
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn create_song(&self, metadata: &SongMetadata) -> Result<(), PropagationError>;

    async fn delete_songs(&self, ids: &[i64]) -> Result<(), PropagationError>;
}

/// reqwest-backed catalog client
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PropagationError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| PropagationError::Setup(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn songs_url(&self) -> String {
        format!("{}/songs", self.base_url)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn create_song(&self, metadata: &SongMetadata) -> Result<(), PropagationError> {
        let response = self
            .http_client
            .post(self.songs_url())
            .json(metadata)
            .send()
            .await?;

        ensure_success(response).await
    }

    async fn delete_songs(&self, ids: &[i64]) -> Result<(), PropagationError> {
        let response = self
            .http_client
            .delete(self.songs_url())
            .query(&[("id", join_csv_ids(ids))])
            .send()
            .await?;

        ensure_success(response).await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<(), PropagationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(PropagationError::Status {
        status: status.as_u16(),
        body,
    })
}
