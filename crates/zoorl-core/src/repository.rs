use crate::error::StorageError;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A persisted URL hash.
///
/// Records are written once and never updated by the service; a later save
/// under the same hash replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlHash {
    /// The short identifier, used as the lookup key.
    pub hash: String,
    /// The original URL that was shortened.
    pub url: String,
    /// UNIX epoch second after which the record is considered expired.
    pub expiration: i64,
}

impl UrlHash {
    /// Whether the record has expired at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_second() >= self.expiration
    }
}

/// Key-value storage for [`UrlHash`] records, keyed by hash.
#[async_trait]
pub trait UrlHashRepository: Send + Sync + 'static {
    /// Stores `record` under its hash, overwriting any existing record.
    async fn save(&self, record: UrlHash) -> Result<()>;

    /// Retrieves the record for an exact hash match.
    /// Returns `None` if no such record is present.
    async fn get_by_hash(&self, hash: &str) -> Result<Option<UrlHash>>;
}

#[async_trait]
impl<R: UrlHashRepository + ?Sized> UrlHashRepository for Arc<R> {
    async fn save(&self, record: UrlHash) -> Result<()> {
        (**self).save(record).await
    }

    async fn get_by_hash(&self, hash: &str) -> Result<Option<UrlHash>> {
        (**self).get_by_hash(hash).await
    }
}
