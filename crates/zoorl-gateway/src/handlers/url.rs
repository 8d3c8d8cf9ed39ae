use crate::error::{AppError, Result};
use crate::model::{CreateUrlHashRequest, UrlHashResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;
use zoorl_core::UrlHashError;

/// Creates a URL hash from a `{ "url", "ttl"? }` body.
pub async fn create_url_hash_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlHashRequest>, JsonRejection>,
) -> Result<Json<UrlHashResponse>> {
    let Json(request) = payload?;

    let response = state.shortener().create_hash(request).await?;
    Ok(Json(response))
}

/// Returns the URL hash data for the requested hash.
pub async fn read_url_hash_handler(
    State(state): State<AppState>,
    Path(url_hash): Path<String>,
) -> Result<Json<UrlHashResponse>> {
    info!(url_hash = %url_hash, "Returning URL for hash");

    let response = state.shortener().read_hash(&url_hash).await?;

    info!(url_hash = %url_hash, url = %response.url, "Got response for hash");
    Ok(Json(response))
}

/// Answers with a `301 Moved Permanently` pointing at the stored URL.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(url_hash): Path<String>,
) -> Result<Response> {
    info!(url_hash = %url_hash, "Redirecting hash");

    let response = state.shortener().read_hash(&url_hash).await?;

    info!(url_hash = %url_hash, url = %response.url, "Redirecting to stored URL");
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [
            (header::LOCATION, response.url),
            (header::CONTENT_TYPE, "text/html".to_string()),
        ],
    )
        .into_response())
}

/// Answers `/u/` and `/r/` requests that carry no hash.
pub async fn missing_url_hash_handler() -> AppError {
    UrlHashError::InvalidInput("URL hash parameter is required".to_string()).into()
}
