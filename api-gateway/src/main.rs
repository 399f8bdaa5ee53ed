// api-gateway/src/main.rs

//! API gateway binary.
//!
//! This binary exposes the validator metrics feed over HTTP:
//!
//! - `GET /` liveness probe,
//! - `GET /metrics` Prometheus text exposition.
//!
//! It owns the metrics store, registers the validator gauges at startup and
//! runs a background loop that refreshes them from a `ValidatorSource`.

mod config;
mod refresh;
mod routes;
mod state;

use std::sync::Arc;

use tokio::signal;

use config::ApiConfig;
use state::{AppState, SharedState};
use validator_metrics::{MetricsStore, StaticValidatorSource, ValidatorMetrics, ValidatorSource};

#[tokio::main]
async fn main() {
    // Basic tracing setup.
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_gateway=info,validator_metrics=info".to_string()),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let api_cfg = ApiConfig::from_env();

    // ---------------------------
    // Metrics store + gauges
    // ---------------------------

    let store = Arc::new(MetricsStore::new());
    let validator_metrics = ValidatorMetrics::register(store.clone())
        .map_err(|e| format!("failed to register validator metrics: {e}"))?;
    tracing::info!(metrics = store.len(), "registered validator gauges");

    // ---------------------------
    // Validator source + refresher
    // ---------------------------

    let source: Arc<dyn ValidatorSource> = match &api_cfg.report_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            let source = StaticValidatorSource::from_json(&json)
                .map_err(|e| format!("failed to load {}: {e}", path.display()))?;
            tracing::info!("serving validator report from {}", path.display());
            Arc::new(source)
        }
        None => {
            tracing::info!("no VALIDATOR_REPORT_FILE set, starting with an empty validator source");
            Arc::new(StaticValidatorSource::default())
        }
    };

    tokio::spawn(refresh::run_refresher(
        source,
        validator_metrics,
        api_cfg.refresh_interval,
    ));

    // ---------------------------
    // HTTP router
    // ---------------------------

    let app_state: SharedState = Arc::new(AppState::new(store));
    let app = routes::build_router(app_state);

    tracing::info!("API gateway listening on http://{}", api_cfg.listen_addr);

    let listener = tokio::net::TcpListener::bind(api_cfg.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", api_cfg.listen_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("API server error: {e}"))?;

    Ok(())
}

/// Waits for Ctrl-C and returns, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
