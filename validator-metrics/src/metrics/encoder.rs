//! Prometheus text exposition encoder.
//!
//! Converts a [`Snapshot`] into `prometheus` protobuf metric families and
//! encodes them with [`prometheus::TextEncoder`]:
//!
//! ```text
//! # HELP validator_balance current validator balance
//! # TYPE validator_balance gauge
//! validator_balance{pubkey="0xAA"} 32.5
//! ```

use prometheus::{
    Encoder,
    proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType},
};

use super::store::{LabeledSeries, MetricFamilySnapshot, MetricKind, Snapshot};

/// Content type of the text exposition format, version 0.0.4.
pub const TEXT_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Stateless encoder for the Prometheus text format.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextEncoder;

impl TextEncoder {
    pub fn new() -> Self {
        Self
    }

    /// MIME type to send alongside [`TextEncoder::render`] output.
    pub fn content_type(&self) -> &'static str {
        TEXT_CONTENT_TYPE
    }

    /// Encodes `snapshot` into exposition bytes.
    ///
    /// Output is fully determined by the snapshot, so rendering the same
    /// snapshot twice yields identical bytes. A family the encoder rejects
    /// is logged and left out; the others are still rendered.
    pub fn render(&self, snapshot: &Snapshot) -> Vec<u8> {
        let encoder = prometheus::TextEncoder::new();
        let mut out = Vec::new();
        for family in snapshot {
            if let Err(e) = encode_family(&encoder, family, &mut out) {
                tracing::error!(
                    metric = %family.definition.name,
                    "failed to encode metric family: {e}"
                );
            }
        }
        out
    }

    /// Same as [`TextEncoder::render`] but returns a `String`.
    pub fn render_to_string(&self, snapshot: &Snapshot) -> String {
        String::from_utf8(self.render(snapshot)).unwrap_or_default()
    }
}

fn encode_family(
    encoder: &prometheus::TextEncoder,
    family: &MetricFamilySnapshot,
    out: &mut Vec<u8>,
) -> Result<(), prometheus::Error> {
    let mut proto = to_proto_family(family);

    if !family.series.is_empty() {
        return encoder.encode(&[proto], out);
    }

    // The encoder refuses families without samples. Encode a placeholder
    // sample and keep only the `#` header lines.
    proto.mut_metric().push(to_proto_metric(&LabeledSeries {
        labels: Vec::new(),
        value: 0.0,
    }));
    let mut buf = Vec::new();
    encoder.encode(&[proto], &mut buf)?;
    for line in buf.split_inclusive(|b| *b == b'\n') {
        if !line.starts_with(b"#") {
            break;
        }
        out.extend_from_slice(line);
    }
    Ok(())
}

fn to_proto_family(family: &MetricFamilySnapshot) -> MetricFamily {
    let def = &family.definition;
    let mut proto = MetricFamily::default();
    proto.set_name(def.name.clone());
    proto.set_help(def.help.clone());
    proto.set_field_type(match def.kind {
        MetricKind::Gauge => MetricType::GAUGE,
    });
    for series in &family.series {
        proto.mut_metric().push(to_proto_metric(series));
    }
    proto
}

fn to_proto_metric(series: &LabeledSeries) -> Metric {
    let mut metric = Metric::default();
    for (name, value) in &series.labels {
        let mut pair = LabelPair::default();
        pair.set_name(name.clone());
        pair.set_value(value.clone());
        metric.mut_label().push(pair);
    }
    let mut gauge = Gauge::default();
    gauge.set_value(series.value);
    metric.set_gauge(gauge);
    metric
}
