//! Core types and traits for the zoorl URL shortener.
//!
//! This crate holds the pieces shared by the storage backends, the
//! shortener service and the HTTP gateway: the hash function, the
//! expiration calculator, the persisted [`UrlHash`] record and the
//! [`UrlHashRepository`] contract.

pub mod clock;
pub mod error;
pub mod expiration;
pub mod hash;
pub mod repository;
pub mod shortener;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StorageError, UrlHashError};
pub use expiration::{compute_expiration, resolve_ttl_hours, DEFAULT_TTL_HOURS};
pub use hash::compute_hash;
pub use repository::{UrlHash, UrlHashRepository};
pub use shortener::{CreateUrlHashRequest, UrlHashResponse, UrlShortener};
