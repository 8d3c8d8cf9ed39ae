//! HTTP boundary of the zoorl URL shortener.
//!
//! Routes:
//! - `POST /u` creates a URL hash
//! - `GET /u/{url_hash}` returns the stored URL hash
//! - `GET /r/{url_hash}` redirects to the stored URL
//! - `GET /health` reports liveness

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
