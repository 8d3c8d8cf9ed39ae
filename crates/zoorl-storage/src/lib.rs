//! Storage backends for zoorl URL hashes.
//!
//! [`RedisRepository`] is the production store and relies on Redis key
//! expiry to drop records once their expiration passes.
//! [`InMemoryRepository`] keeps everything in process and is meant for
//! tests and local runs.

pub mod memory;
pub mod redis;

pub use crate::memory::InMemoryRepository;
pub use crate::redis::{RedisRepository, DEFAULT_KEY_PREFIX};
pub use zoorl_core::repository::{Result, UrlHash, UrlHashRepository};
pub use zoorl_core::StorageError;
