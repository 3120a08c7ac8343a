//! Hosted data store client.
//!
//! # Architecture
//!
//! - The data store is the source of truth for catalog records - NO local
//!   sync, direct REST calls against its PostgREST-style endpoints
//! - In-memory caching via `moka` for catalog reads (5 minute TTL)
//! - Explicit per-request timeout; idempotent reads get a single retry on
//!   transient (timeout/connect) failures. Writes are never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use aristo_weaves_storefront::store::{ProductQuery, StoreClient};
//!
//! let client = StoreClient::new(&config.store)?;
//!
//! // Read the catalog
//! let products = client.list_products(&ProductQuery::default()).await?;
//! let product = client.get_product_by_slug("luxe-shaggy-ivory-rug").await?;
//!
//! // Append a newsletter subscription (upsert by email)
//! client.subscribe_newsletter(&email).await?;
//! ```

mod cache;
mod client;

pub use client::{ProductQuery, StoreClient};

use thiserror::Error;

/// Errors that can occur when talking to the hosted data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status.
    #[error("store API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Only network-level failures qualify; a non-success status from the
    /// store is deterministic and retrying it would just repeat the error.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { .. } | Self::Parse(_) => false,
        }
    }
}
