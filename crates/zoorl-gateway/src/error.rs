use crate::model::MessageResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};
use zoorl_core::UrlHashError;

pub type Result<T> = std::result::Result<T, AppError>;

const NOT_FOUND_MESSAGE: &str = "The specified URL hash is invalid or expired!";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    UrlHash(#[from] UrlHashError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(message) | AppError::UrlHash(UrlHashError::InvalidInput(message)) => {
                warn!(reason = %message, "Malformed request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::UrlHash(UrlHashError::NotFound(hash)) => {
                warn!(url_hash = %hash, "URL hash not found");
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            AppError::UrlHash(UrlHashError::StorageUnavailable(source)) => {
                error!(error = %source, "Unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(MessageResponse { message })).into_response()
    }
}
