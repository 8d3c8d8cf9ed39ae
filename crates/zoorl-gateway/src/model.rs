use serde::Serialize;

pub use zoorl_core::{CreateUrlHashRequest, UrlHashResponse};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
