use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_hash_handler, health_handler, missing_url_hash_handler, read_url_hash_handler,
    redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/u",
                Router::new()
                    .route("/", post(create_url_hash_handler))
                    .route("/{url_hash}", get(read_url_hash_handler)),
            )
            .route("/r/{url_hash}", get(redirect_handler))
            .route("/u/", get(missing_url_hash_handler))
            .route("/r/", get(missing_url_hash_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
