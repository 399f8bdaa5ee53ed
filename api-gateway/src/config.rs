//! API gateway configuration.
//!
//! Starts from `validator_metrics::ExporterConfig::default()` and lets a few
//! environment variables override it:
//!
//! - `API_LISTEN_ADDR`: socket address for `/` and `/metrics`,
//! - `REFRESH_INTERVAL_SECS`: validator source polling interval,
//! - `VALIDATOR_REPORT_FILE`: JSON report served by a static source.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use validator_metrics::ExporterConfig;

/// Configuration for the API gateway HTTP server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to.
    pub listen_addr: SocketAddr,
    /// Interval between two validator refresh cycles.
    pub refresh_interval: Duration,
    /// Optional JSON file holding a fixed validator report.
    pub report_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let exporter = ExporterConfig::default();
        Self {
            listen_addr: exporter.listen_addr,
            refresh_interval: exporter.refresh_interval,
            report_file: None,
        }
    }
}

impl ApiConfig {
    /// Builds the config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Invalid values are
    /// logged and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("API_LISTEN_ADDR") {
            match raw.parse() {
                Ok(addr) => cfg.listen_addr = addr,
                Err(e) => tracing::warn!("ignoring invalid API_LISTEN_ADDR {raw:?}: {e}"),
            }
        }

        if let Some(raw) = lookup("REFRESH_INTERVAL_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => cfg.refresh_interval = Duration::from_secs(secs),
                _ => tracing::warn!("ignoring invalid REFRESH_INTERVAL_SECS {raw:?}"),
            }
        }

        cfg.report_file = lookup("VALIDATOR_REPORT_FILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let cfg = ApiConfig::from_lookup(lookup_from(&[]));
        let defaults = ApiConfig::default();

        assert_eq!(cfg.listen_addr, defaults.listen_addr);
        assert_eq!(cfg.refresh_interval, defaults.refresh_interval);
        assert!(cfg.report_file.is_none());
    }

    #[test]
    fn valid_overrides_are_applied() {
        let cfg = ApiConfig::from_lookup(lookup_from(&[
            ("API_LISTEN_ADDR", "0.0.0.0:8081"),
            ("REFRESH_INTERVAL_SECS", "12"),
            ("VALIDATOR_REPORT_FILE", "/tmp/report.json"),
        ]));

        assert_eq!(cfg.listen_addr, "0.0.0.0:8081".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.refresh_interval, Duration::from_secs(12));
        assert_eq!(cfg.report_file, Some(PathBuf::from("/tmp/report.json")));
    }

    #[test]
    fn invalid_overrides_fall_back_to_defaults() {
        let cfg = ApiConfig::from_lookup(lookup_from(&[
            ("API_LISTEN_ADDR", "not-an-addr"),
            ("REFRESH_INTERVAL_SECS", "0"),
        ]));
        let defaults = ApiConfig::default();

        assert_eq!(cfg.listen_addr, defaults.listen_addr);
        assert_eq!(cfg.refresh_interval, defaults.refresh_interval);
    }
}
