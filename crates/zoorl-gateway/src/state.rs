use std::sync::Arc;

use zoorl_core::UrlShortener;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn UrlShortener>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn UrlShortener>) -> Self {
        Self { shortener }
    }

    pub fn shortener(&self) -> &dyn UrlShortener {
        self.shortener.as_ref()
    }
}
