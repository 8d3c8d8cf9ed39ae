use crate::error::Result;
use crate::repository::UrlHash;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Input of the create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUrlHashRequest {
    /// The URL to shorten.
    pub url: String,
    /// Relative time-to-live in hours. Defaults to one day when absent.
    pub ttl: Option<i64>,
}

impl CreateUrlHashRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, hours: i64) -> Self {
        self.ttl = Some(hours);
        self
    }
}

/// Output of both the create and the read operation.
///
/// `ttl` carries the absolute expiration as UNIX epoch seconds, not the
/// relative hour count accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlHashResponse {
    pub url_hash: String,
    pub url: String,
    pub ttl: i64,
}

impl From<UrlHash> for UrlHashResponse {
    fn from(record: UrlHash) -> Self {
        Self {
            url_hash: record.hash,
            url: record.url,
            ttl: record.expiration,
        }
    }
}

#[async_trait]
pub trait UrlShortener: Send + Sync + 'static {
    /// Hashes the URL, computes its expiration and persists the record.
    async fn create_hash(&self, request: CreateUrlHashRequest) -> Result<UrlHashResponse>;

    /// Resolves a hash to its record.
    /// Fails with `NotFound` if the hash does not exist or has been purged.
    async fn read_hash(&self, hash: &str) -> Result<UrlHashResponse>;
}
