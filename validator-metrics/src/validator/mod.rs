//! Validator status and balance gauges.
//!
//! - domain types delivered by the upstream collector ([`types`]),
//! - the four `pubkey`-labeled gauges and the refresh-cycle update
//!   ([`exporter`]),
//! - the [`source::ValidatorSource`] seam for the upstream itself.

pub mod exporter;
pub mod source;
pub mod types;

pub use exporter::{
    PUBKEY_LABEL, RefreshSummary, VALIDATOR_BALANCE, VALIDATOR_STATUSES, VALIDATOR_TOTAL_BALANCE,
    VALIDATOR_WITHDRAWAL, ValidatorMetrics,
};
pub use source::{SourceError, StaticValidatorSource, ValidatorSource};
pub use types::{
    InvalidStatusCode, UNITS_PER_COIN, ValidatorInfo, ValidatorReport, ValidatorStatus,
    ValidatorStatusEntry,
};
