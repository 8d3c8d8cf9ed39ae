use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tracing::{debug, trace, warn};
use zoorl_core::repository::{Result, UrlHash, UrlHashRepository};
use zoorl_core::StorageError;

/// Key prefix used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "zoorl:hash:";

/// A Redis-backed implementation of [`UrlHashRepository`].
///
/// Each record is stored as a JSON string under `<prefix><hash>` and given an
/// `EXPIREAT` equal to its expiration, so Redis drops it on its own once it
/// expires. The connection is a [`ConnectionManager`] created once and cloned
/// per call; it multiplexes requests and reconnects after a dropped link.
#[derive(Clone)]
pub struct RedisRepository {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRepository")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

impl RedisRepository {
    /// Creates a repository over an existing connection, using [`DEFAULT_KEY_PREFIX`].
    pub fn new(conn: ConnectionManager) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a repository over an existing connection with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A managed Redis connection
    /// * `key_prefix` - Prefix for record keys (e.g., "myapp:hash:")
    pub fn with_prefix(conn: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a client for `redis_url` and establishes the managed connection.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self> {
        Self::connect_with_config(redis_url, key_prefix, ConnectionManagerConfig::new()).await
    }

    /// Like [`connect`](Self::connect), with explicit retry and timeout settings.
    ///
    /// A server that cannot be reached once the retries are exhausted yields
    /// [`StorageError::Unavailable`] or [`StorageError::Timeout`].
    pub async fn connect_with_config(
        redis_url: &str,
        key_prefix: impl Into<String>,
        config: ConnectionManagerConfig,
    ) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("failed to open Redis client", e))?;
        let conn = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::with_prefix(conn, key_prefix))
    }

    /// Returns the configured key prefix.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Generates the storage key for a hash.
    pub fn key(&self, hash: &str) -> String {
        format!("{}{}", self.key_prefix, hash)
    }
}

#[async_trait]
impl UrlHashRepository for RedisRepository {
    async fn save(&self, record: UrlHash) -> Result<()> {
        let key = self.key(&record.hash);
        trace!(hash = %record.hash, "Storing URL hash in Redis");

        let json = serde_json::to_string(&record).map_err(|e| {
            StorageError::InvalidData(format!("failed to serialize record '{}': {e}", record.hash))
        })?;

        let mut conn = self.conn.clone();
        let result = redis::pipe()
            .atomic()
            .set(&key, json)
            .ignore()
            .expire_at(&key, record.expiration)
            .ignore()
            .query_async::<()>(&mut conn)
            .await;

        match result {
            Ok(()) => {
                debug!(hash = %record.hash, expiration = record.expiration, "Stored URL hash in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(hash = %record.hash, url = %record.url, error = %e, "Failed to store URL hash in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }

    async fn get_by_hash(&self, hash: &str) -> Result<Option<UrlHash>> {
        let key = self.key(hash);
        trace!(hash = %hash, "Fetching URL hash from Redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(stored)) => match serde_json::from_str::<UrlHash>(&stored) {
                Ok(record) => {
                    debug!(hash = %hash, "Found URL hash in Redis");
                    Ok(Some(record))
                }
                Err(e) => {
                    warn!(hash = %hash, error = %e, "Failed to deserialize stored record");
                    Err(StorageError::InvalidData(format!(
                        "invalid stored value for key '{key}': {e}"
                    )))
                }
            },
            Ok(None) => {
                trace!(hash = %hash, "URL hash not present in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(hash = %hash, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }
}
