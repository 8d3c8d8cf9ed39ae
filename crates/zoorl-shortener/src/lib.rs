//! URL hash creation and lookup.
//!
//! [`UrlHashService`] implements the create and read operations on top of
//! any [`UrlHashRepository`](zoorl_core::UrlHashRepository). Core types are
//! re-exported from `zoorl_core`.

pub mod generator;
pub mod service;

pub use generator::{HashGenerator, Sha256Base62};
pub use service::UrlHashService;
pub use zoorl_core::{CreateUrlHashRequest, UrlHashError, UrlHashResponse, UrlShortener};
