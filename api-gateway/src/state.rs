//! Shared application state.

use std::sync::Arc;

use validator_metrics::{MetricsStore, TextEncoder};

/// State shared by the HTTP handlers.
///
/// This is wrapped in an [`Arc`] and passed to request handlers via Axum's
/// `State` extractor. The refresh loop holds its own handle to the same
/// store.
pub struct AppState {
    /// Registry rendered on every scrape.
    pub store: Arc<MetricsStore>,
    /// Encoder for the `/metrics` body.
    pub encoder: TextEncoder,
}

impl AppState {
    pub fn new(store: Arc<MetricsStore>) -> Self {
        Self {
            store,
            encoder: TextEncoder::new(),
        }
    }
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;
