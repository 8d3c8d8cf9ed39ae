mod health;
mod url;

pub use health::health_handler;
pub use url::{
    create_url_hash_handler, missing_url_hash_handler, read_url_hash_handler, redirect_handler,
};
