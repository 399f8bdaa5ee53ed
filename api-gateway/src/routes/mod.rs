//! HTTP routes exposed by the gateway.

pub mod health;
pub mod metrics;

use axum::{Router, routing::get};

use crate::state::SharedState;

/// Builds the router serving `GET /` and `GET /metrics`.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(health::health))
        .route("/metrics", get(metrics::metrics))
        .with_state(state)
}
