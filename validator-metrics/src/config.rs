//! Top-level configuration for the validator metrics exporter.
//!
//! The goal is to have a single `ExporterConfig` struct that binaries can
//! construct from defaults and then override from the environment as
//! needed.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the exporter's HTTP surface and refresh loop.
#[derive(Clone, Debug)]
pub struct ExporterConfig {
    /// Address to bind the HTTP server serving `/` and `/metrics` to.
    pub listen_addr: SocketAddr,
    /// How often the validator source is polled.
    pub refresh_interval: Duration,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        // Safe to unwrap: this is a fixed, valid address literal.
        let addr: SocketAddr = "127.0.0.1:9898"
            .parse()
            .expect("hard-coded metrics listen address should parse");
        Self {
            listen_addr: addr,
            refresh_interval: Duration::from_secs(60),
        }
    }
}
