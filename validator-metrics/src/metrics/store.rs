//! In-process store of labeled gauge series.
//!
//! The store owns every registered [`MetricDefinition`] and the current value
//! of each labeled series. Definitions live in a `BTreeMap` behind a
//! `parking_lot::RwLock` so registration is serialized against readers and
//! iteration order is the metric name. Each family keeps its series in a
//! `DashMap` of atomics, so writes to existing series only take a shared
//! lock on the definition table and a shard lock inside the family.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;

use super::error::MetricsError;

/// Kind of a registered metric. Only gauges are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
}

/// Registration-time description of a metric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricDefinition {
    pub name: String,
    pub kind: MetricKind,
    pub help: String,
    /// Label names in declaration order.
    pub label_names: Vec<String>,
}

/// One labeled series and its current value.
///
/// `labels` follows the declaration order of the owning definition.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledSeries {
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

/// A metric definition together with its series at snapshot time.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricFamilySnapshot {
    pub definition: MetricDefinition,
    pub series: Vec<LabeledSeries>,
}

/// Point-in-time copy of the whole store, ordered by metric name and then
/// by label values.
pub type Snapshot = Vec<MetricFamilySnapshot>;

struct GaugeFamily {
    definition: MetricDefinition,
    /// Label values in declaration order -> `f64` bit pattern.
    series: DashMap<Vec<String>, AtomicU64>,
}

impl GaugeFamily {
    /// Resolves `labels` into values ordered like the declared label names.
    fn label_values(&self, labels: &[(&str, &str)]) -> Result<Vec<String>, MetricsError> {
        let names = &self.definition.label_names;
        let mismatch = || MetricsError::LabelMismatch {
            metric: self.definition.name.clone(),
            expected: names.clone(),
            got: labels.iter().map(|(k, _)| k.to_string()).collect(),
        };

        if labels.len() != names.len() {
            return Err(mismatch());
        }

        let mut values = Vec::with_capacity(names.len());
        for name in names {
            let mut matching = labels.iter().filter(|(k, _)| k == name);
            match (matching.next(), matching.next()) {
                (Some((_, v)), None) => values.push((*v).to_string()),
                _ => return Err(mismatch()),
            }
        }
        Ok(values)
    }

    fn snapshot(&self) -> MetricFamilySnapshot {
        let mut rows: Vec<(Vec<String>, f64)> = self
            .series
            .iter()
            .map(|entry| {
                let value = f64::from_bits(entry.value().load(Ordering::Acquire));
                (entry.key().clone(), value)
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        let series = rows
            .into_iter()
            .map(|(values, value)| LabeledSeries {
                labels: self
                    .definition
                    .label_names
                    .iter()
                    .cloned()
                    .zip(values)
                    .collect(),
                value,
            })
            .collect();

        MetricFamilySnapshot {
            definition: self.definition.clone(),
            series,
        }
    }
}

/// Registry of labeled gauges.
///
/// Construct one at startup, register every metric, then share it behind an
/// [`std::sync::Arc`] between the updater and the HTTP handlers.
#[derive(Default)]
pub struct MetricsStore {
    families: RwLock<BTreeMap<String, GaugeFamily>>,
}

impl MetricsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gauge with a fixed set of label names.
    ///
    /// Re-registering an existing name is always an error, even when the
    /// help text and labels are identical.
    pub fn register_gauge(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<MetricDefinition, MetricsError> {
        if !is_valid_metric_name(name) {
            return Err(MetricsError::InvalidMetricName(name.to_string()));
        }
        for (i, label) in label_names.iter().enumerate() {
            if !is_valid_label_name(label) || label_names[..i].contains(label) {
                return Err(MetricsError::InvalidLabelName {
                    metric: name.to_string(),
                    label: label.to_string(),
                });
            }
        }

        let definition = MetricDefinition {
            name: name.to_string(),
            kind: MetricKind::Gauge,
            help: help.to_string(),
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
        };

        let mut families = self.families.write();
        if families.contains_key(name) {
            return Err(MetricsError::DuplicateMetric(name.to_string()));
        }
        families.insert(
            name.to_string(),
            GaugeFamily {
                definition: definition.clone(),
                series: DashMap::new(),
            },
        );

        tracing::debug!(metric = name, labels = ?label_names, "registered gauge");
        Ok(definition)
    }

    /// Sets the absolute value of the series identified by `labels`.
    ///
    /// `labels` must carry exactly the registered label names, in any order.
    /// On error nothing is written.
    pub fn set(&self, name: &str, labels: &[(&str, &str)], value: f64) -> Result<(), MetricsError> {
        let families = self.families.read();
        let family = families
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))?;
        let key = family.label_values(labels)?;
        let bits = value.to_bits();

        // Fast path: existing series only needs a shard read lock.
        if let Some(slot) = family.series.get(&key) {
            slot.store(bits, Ordering::Release);
            return Ok(());
        }

        family
            .series
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .store(bits, Ordering::Release);
        Ok(())
    }

    /// Returns a copy of every definition and its series.
    pub fn snapshot(&self) -> Snapshot {
        let families = self.families.read();
        families.values().map(GaugeFamily::snapshot).collect()
    }

    /// Number of registered metrics.
    pub fn len(&self) -> usize {
        self.families.read().len()
    }

    /// Returns `true` if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.families.read().is_empty()
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, excluding the reserved `__` prefix.
fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
