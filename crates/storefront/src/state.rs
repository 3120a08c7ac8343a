//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::content::ContentLibrary;
use crate::store::{StoreClient, StoreError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("store client error: {0}")]
    Store(#[from] StoreError),
    #[error("invalid embedded content: {0}")]
    Content(#[from] serde_json::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the data store client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: StoreClient,
    content: ContentLibrary,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store client cannot be built or the
    /// embedded content fails to parse.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let store = StoreClient::new(&config.store)?;
        let content = ContentLibrary::load()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                content,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the data store client.
    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.inner.store
    }

    /// Get a reference to the static content library.
    #[must_use]
    pub fn content(&self) -> &ContentLibrary {
        &self.inner.content
    }
}
