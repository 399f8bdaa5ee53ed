//! Validator metrics library crate.
//!
//! This crate provides the building blocks of a pull-based Prometheus
//! exporter for proof-of-stake validators:
//!
//! - a concurrent store of labeled gauges and a text encoder (`metrics`),
//! - validator domain types, gauges and the upstream seam (`validator`),
//! - and a top-level exporter configuration (`config`).
//!
//! Binaries compose these pieces with an HTTP server and a refresh loop.

pub mod config;
pub mod metrics;
pub mod validator;

pub use config::ExporterConfig;

// Re-export the registry and encoder.
pub use metrics::{
    LabeledSeries, MetricDefinition, MetricFamilySnapshot, MetricKind, MetricsError, MetricsStore,
    Snapshot, TEXT_CONTENT_TYPE, TextEncoder,
};

// Re-export validator types at the crate root for convenience.
pub use validator::*;
