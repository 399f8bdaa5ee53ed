//! Validator gauges and the per-cycle update that feeds them.

use std::sync::Arc;

use crate::metrics::{MetricsError, MetricsStore};

use super::types::{ValidatorInfo, ValidatorReport, ValidatorStatusEntry};

pub const VALIDATOR_STATUSES: &str = "validator_statuses";
pub const VALIDATOR_BALANCE: &str = "validator_balance";
pub const VALIDATOR_WITHDRAWAL: &str = "validator_withdrawal";
pub const VALIDATOR_TOTAL_BALANCE: &str = "validator_total_balance";

/// Label carrying the validator public key on every validator gauge.
pub const PUBKEY_LABEL: &str = "pubkey";

/// Outcome of one [`ValidatorMetrics::store_metrics`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Series written successfully.
    pub written: usize,
    /// Writes rejected by the store and skipped.
    pub skipped: usize,
}

/// Handle over the validator gauges registered in a [`MetricsStore`].
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct ValidatorMetrics {
    store: Arc<MetricsStore>,
}

impl ValidatorMetrics {
    /// Registers the validator gauges into `store`.
    ///
    /// Fails if any of them is already registered.
    pub fn register(store: Arc<MetricsStore>) -> Result<Self, MetricsError> {
        store.register_gauge(
            VALIDATOR_STATUSES,
            "validator statuses: 0 UNKNOWN, 1 DEPOSITED, 2 PENDING, 3 ACTIVE, 4 EXITING, 5 SLASHING, 6 EXITED",
            &[PUBKEY_LABEL],
        )?;
        store.register_gauge(
            VALIDATOR_BALANCE,
            "current validator balance",
            &[PUBKEY_LABEL],
        )?;
        store.register_gauge(
            VALIDATOR_WITHDRAWAL,
            "total validator withdrawal",
            &[PUBKEY_LABEL],
        )?;
        store.register_gauge(
            VALIDATOR_TOTAL_BALANCE,
            "current validator total balance",
            &[PUBKEY_LABEL],
        )?;

        Ok(Self { store })
    }

    /// The underlying store, for rendering.
    pub fn store(&self) -> &Arc<MetricsStore> {
        &self.store
    }

    /// Writes one refresh cycle of statuses and balances.
    ///
    /// Balances are converted from raw units to whole coins. A rejected
    /// write is logged and skipped; the rest of the batch is still applied.
    /// The batch is not atomic with respect to concurrent snapshots.
    pub fn store_metrics(
        &self,
        statuses: &[ValidatorStatusEntry],
        validators: &[ValidatorInfo],
    ) -> RefreshSummary {
        let mut summary = RefreshSummary::default();

        for entry in statuses {
            self.write(
                &mut summary,
                VALIDATOR_STATUSES,
                &entry.public_key,
                f64::from(entry.status.code()),
            );
        }

        for validator in validators {
            let pubkey = &validator.public_key;
            self.write(&mut summary, VALIDATOR_BALANCE, pubkey, validator.balance_coins());
            self.write(
                &mut summary,
                VALIDATOR_WITHDRAWAL,
                pubkey,
                validator.withdrawal_coins(),
            );
            self.write(
                &mut summary,
                VALIDATOR_TOTAL_BALANCE,
                pubkey,
                validator.total_balance_coins(),
            );
        }

        tracing::debug!(
            written = summary.written,
            skipped = summary.skipped,
            "stored validator metrics"
        );
        summary
    }

    /// Convenience wrapper around [`ValidatorMetrics::store_metrics`].
    pub fn apply(&self, report: &ValidatorReport) -> RefreshSummary {
        self.store_metrics(&report.statuses, &report.validators)
    }

    fn write(&self, summary: &mut RefreshSummary, metric: &str, pubkey: &str, value: f64) {
        match self.store.set(metric, &[(PUBKEY_LABEL, pubkey)], value) {
            Ok(()) => summary.written += 1,
            Err(e) => {
                summary.skipped += 1;
                tracing::warn!(metric, pubkey, error = %e, "skipping validator metric update");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TextEncoder;
    use crate::validator::ValidatorStatus;

    fn value_of(store: &MetricsStore, metric: &str, pubkey: &str) -> Option<f64> {
        store
            .snapshot()
            .into_iter()
            .find(|f| f.definition.name == metric)?
            .series
            .into_iter()
            .find(|s| s.labels == vec![(PUBKEY_LABEL.to_string(), pubkey.to_string())])
            .map(|s| s.value)
    }

    fn registered() -> ValidatorMetrics {
        ValidatorMetrics::register(Arc::new(MetricsStore::new())).expect("register gauges")
    }

    #[test]
    fn registers_four_pubkey_gauges() {
        let metrics = registered();
        let names: Vec<_> = metrics
            .store()
            .snapshot()
            .into_iter()
            .map(|f| {
                assert_eq!(f.definition.label_names, vec![PUBKEY_LABEL.to_string()]);
                f.definition.name
            })
            .collect();

        assert_eq!(
            names,
            [
                VALIDATOR_BALANCE,
                VALIDATOR_STATUSES,
                VALIDATOR_TOTAL_BALANCE,
                VALIDATOR_WITHDRAWAL,
            ]
        );
    }

    #[test]
    fn registering_twice_on_one_store_fails() {
        let metrics = registered();
        let err = ValidatorMetrics::register(metrics.store().clone()).err();
        assert_eq!(
            err,
            Some(MetricsError::DuplicateMetric(VALIDATOR_STATUSES.to_string()))
        );
    }

    #[test]
    fn balances_are_converted_to_whole_coins() {
        let metrics = registered();
        let summary = metrics.store_metrics(
            &[],
            &[ValidatorInfo {
                public_key: "0xBB".into(),
                balance: 32_000_000_000,
                withdrawal: 500_000_000,
            }],
        );

        assert_eq!(summary, RefreshSummary { written: 3, skipped: 0 });
        let store = metrics.store();
        assert_eq!(value_of(store, VALIDATOR_BALANCE, "0xBB"), Some(32.0));
        assert_eq!(value_of(store, VALIDATOR_WITHDRAWAL, "0xBB"), Some(0.5));
        assert_eq!(value_of(store, VALIDATOR_TOTAL_BALANCE, "0xBB"), Some(32.5));
    }

    #[test]
    fn statuses_are_stored_as_codes_and_overwritten() {
        let metrics = registered();
        let entry = |status| ValidatorStatusEntry {
            public_key: "0xAA".into(),
            status,
        };

        metrics.store_metrics(&[entry(ValidatorStatus::Pending)], &[]);
        metrics.store_metrics(&[entry(ValidatorStatus::Active)], &[]);

        let store = metrics.store();
        assert_eq!(value_of(store, VALIDATOR_STATUSES, "0xAA"), Some(3.0));
        let statuses = store
            .snapshot()
            .into_iter()
            .find(|f| f.definition.name == VALIDATOR_STATUSES)
            .unwrap();
        assert_eq!(statuses.series.len(), 1);
    }

    #[test]
    fn rendered_report_contains_expected_lines() {
        let metrics = registered();
        metrics.apply(&ValidatorReport {
            statuses: vec![ValidatorStatusEntry {
                public_key: "0xAA".into(),
                status: ValidatorStatus::Active,
            }],
            validators: vec![ValidatorInfo {
                public_key: "0xAA".into(),
                balance: 32_500_000_000,
                withdrawal: 0,
            }],
        });

        let text = TextEncoder::new().render_to_string(&metrics.store().snapshot());
        assert!(text.contains("validator_balance{pubkey=\"0xAA\"} 32.5\n"));
        assert!(text.contains("validator_statuses{pubkey=\"0xAA\"} 3\n"));
        assert!(text.contains("validator_withdrawal{pubkey=\"0xAA\"} 0\n"));
        assert!(text.contains("# TYPE validator_total_balance gauge\n"));
    }

    #[test]
    fn failed_writes_are_skipped_without_aborting_the_batch() {
        // Only the balance gauge exists; the other three writes are rejected.
        let store = Arc::new(MetricsStore::new());
        store
            .register_gauge(VALIDATOR_BALANCE, "current validator balance", &[PUBKEY_LABEL])
            .unwrap();
        let metrics = ValidatorMetrics { store };

        let summary = metrics.store_metrics(
            &[ValidatorStatusEntry {
                public_key: "0xAA".into(),
                status: ValidatorStatus::Active,
            }],
            &[ValidatorInfo {
                public_key: "0xAA".into(),
                balance: 1_000_000_000,
                withdrawal: 0,
            }],
        );

        assert_eq!(summary, RefreshSummary { written: 1, skipped: 3 });
        assert_eq!(value_of(metrics.store(), VALIDATOR_BALANCE, "0xAA"), Some(1.0));
    }
}
