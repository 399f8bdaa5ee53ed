//! Metrics registry and exposition for the exporter.
//!
//! This module defines an in-process store of labeled gauges and an encoder
//! that serialises the store into the Prometheus text format.
//!
//! Typical usage:
//!
//! ```ignore
//! use std::sync::Arc;
//! use validator_metrics::metrics::{MetricsStore, TextEncoder};
//!
//! let store = Arc::new(MetricsStore::new());
//! store.register_gauge("validator_balance", "current validator balance", &["pubkey"])?;
//!
//! // Updater side:
//! store.set("validator_balance", &[("pubkey", "0xAA")], 32.5)?;
//!
//! // Scrape side:
//! let encoder = TextEncoder::new();
//! let body = encoder.render(&store.snapshot());
//! let content_type = encoder.content_type();
//! ```

pub mod encoder;
pub mod error;
pub mod store;

pub use encoder::{TEXT_CONTENT_TYPE, TextEncoder};
pub use error::MetricsError;
pub use store::{
    LabeledSeries, MetricDefinition, MetricFamilySnapshot, MetricKind, MetricsStore, Snapshot,
};
