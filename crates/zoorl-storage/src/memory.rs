use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};
use zoorl_core::repository::{Result, UrlHash, UrlHashRepository};
use zoorl_core::Clock;

/// In-memory implementation of [`UrlHashRepository`] backed by a DashMap.
///
/// Reads never filter on expiration; records stay until [`purge_expired`]
/// sweeps them, the same way a store with native expiry removes keys on its
/// own schedule.
///
/// [`purge_expired`]: InMemoryRepository::purge_expired
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlHash>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored records, expired or not.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Removes every record whose expiration has passed at `now`.
    /// Returns the number of removed records.
    pub fn purge_expired(&self, now: Timestamp) -> usize {
        let before = self.storage.len();
        self.storage.retain(|_, record| !record.is_expired_at(now));
        let purged = before.saturating_sub(self.storage.len());
        debug!(purged, "Purged expired records");
        purged
    }

    /// Spawns a task that calls [`purge_expired`] every `period`, reading the
    /// time from `clock`. The task runs until the returned handle is aborted.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero, or if called outside a Tokio runtime.
    ///
    /// [`purge_expired`]: InMemoryRepository::purge_expired
    pub fn spawn_purge_task<C: Clock>(
        self: Arc<Self>,
        clock: C,
        period: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                self.purge_expired(clock.now());
            }
        })
    }
}

#[async_trait]
impl UrlHashRepository for InMemoryRepository {
    async fn save(&self, record: UrlHash) -> Result<()> {
        trace!(hash = %record.hash, "Saving URL hash in memory");
        self.storage.insert(record.hash.clone(), record);
        Ok(())
    }

    async fn get_by_hash(&self, hash: &str) -> Result<Option<UrlHash>> {
        trace!(hash = %hash, "Fetching URL hash from memory");
        Ok(self.storage.get(hash).map(|entry| entry.value().clone()))
    }
}
