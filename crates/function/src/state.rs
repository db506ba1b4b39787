//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::FunctionConfig;
use crate::contentful::ContentfulClient;
use crate::handler::ProductFeedHandler;

/// Application state shared across all routes.
///
/// Cheaply cloneable via `Arc`; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    feed: ProductFeedHandler,
}

impl AppState {
    /// Build state whose handler reads credentials from the environment.
    #[must_use]
    pub fn new(config: &FunctionConfig) -> Self {
        let client = ContentfulClient::new(config.contentful.clone());
        Self::with_handler(ProductFeedHandler::new(client))
    }

    /// Build state around an existing handler.
    #[must_use]
    pub fn with_handler(feed: ProductFeedHandler) -> Self {
        Self {
            inner: Arc::new(AppStateInner { feed }),
        }
    }

    /// Get a reference to the product feed handler.
    #[must_use]
    pub fn feed(&self) -> &ProductFeedHandler {
        &self.inner.feed
    }
}
