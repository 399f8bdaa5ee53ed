//! Upstream source of validator data.
//!
//! Discovering statuses and balances (beacon node queries, database reads)
//! is the job of whatever implements [`ValidatorSource`]. The exporter only
//! pulls a [`ValidatorReport`] per refresh cycle and writes it into the
//! validator gauges.

use thiserror::Error;

use super::types::ValidatorReport;

/// Errors produced while fetching validator data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The upstream could not be reached or returned an error.
    #[error("validator source transport error: {0}")]
    Transport(String),
    /// The upstream answered with data that could not be decoded.
    #[error("failed to decode validator report: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Pluggable provider of validator statuses and balances.
///
/// Implementations are called from a blocking context once per refresh
/// cycle and must be shareable across threads.
pub trait ValidatorSource: Send + Sync {
    fn fetch(&self) -> Result<ValidatorReport, SourceError>;
}

/// Source that always returns the same report.
///
/// Useful for tests and for running the exporter without an upstream.
#[derive(Clone, Debug, Default)]
pub struct StaticValidatorSource {
    report: ValidatorReport,
}

impl StaticValidatorSource {
    pub fn new(report: ValidatorReport) -> Self {
        Self { report }
    }

    /// Parses a JSON-encoded [`ValidatorReport`].
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl ValidatorSource for StaticValidatorSource {
    fn fetch(&self) -> Result<ValidatorReport, SourceError> {
        Ok(self.report.clone())
    }
}
