//! Background validator refresh loop.

use std::sync::Arc;
use std::time::Duration;

use validator_metrics::{RefreshSummary, ValidatorMetrics, ValidatorSource};

/// Runs one refresh cycle: fetch a report and write it into the gauges.
///
/// The source may block, so the fetch runs on Tokio's blocking pool.
/// Returns `None` when the fetch failed and nothing was written.
pub async fn refresh_once(
    source: Arc<dyn ValidatorSource>,
    metrics: &ValidatorMetrics,
) -> Option<RefreshSummary> {
    match tokio::task::spawn_blocking(move || source.fetch()).await {
        Ok(Ok(report)) => {
            let summary = metrics.apply(&report);
            tracing::info!(
                statuses = report.statuses.len(),
                validators = report.validators.len(),
                written = summary.written,
                skipped = summary.skipped,
                "refreshed validator metrics"
            );
            Some(summary)
        }
        Ok(Err(e)) => {
            tracing::warn!("failed to fetch validator data: {e}");
            None
        }
        Err(e) => {
            tracing::error!("validator source task failed: {e}");
            None
        }
    }
}

/// Periodically refreshes the validator gauges from `source`.
pub async fn run_refresher(
    source: Arc<dyn ValidatorSource>,
    metrics: ValidatorMetrics,
    interval: Duration,
) {
    let interval = interval.max(Duration::from_secs(1));
    tracing::info!("validator refresher running with interval {}s", interval.as_secs());

    loop {
        refresh_once(source.clone(), &metrics).await;
        tokio::time::sleep(interval).await;
    }
}
