use thiserror::Error;

/// Errors returned by [`super::MetricsStore`] operations.
///
/// Registration errors are configuration mistakes and should abort startup.
/// Write errors (`UnknownMetric`, `LabelMismatch`) are integration bugs: the
/// offending write is rejected and the store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A metric with this name has already been registered.
    #[error("metric `{0}` is already registered")]
    DuplicateMetric(String),
    /// No metric with this name has been registered.
    #[error("metric `{0}` is not registered")]
    UnknownMetric(String),
    /// The label keys of a write do not match the registered label names.
    #[error("label mismatch for metric `{metric}`: expected {expected:?}, got {got:?}")]
    LabelMismatch {
        metric: String,
        expected: Vec<String>,
        got: Vec<String>,
    },
    /// The metric name is not a valid Prometheus metric name.
    #[error("invalid metric name `{0}`")]
    InvalidMetricName(String),
    /// A declared label name is invalid, reserved, or declared twice.
    #[error("invalid label name `{label}` for metric `{metric}`")]
    InvalidLabelName { metric: String, label: String },
}
