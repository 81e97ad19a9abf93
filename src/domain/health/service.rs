use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

use super::models::{AggregateHealth, HealthCheckResult};
use super::ports::{HealthCheck, HealthService};

/// Deadline used when `now + timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Runs every registered check concurrently under one shared deadline.
pub struct HealthAggregator {
    checks: Vec<Arc<dyn HealthCheck>>,
    version: String,
}

impl HealthAggregator {
    pub fn new(checks: Vec<Arc<dyn HealthCheck>>, version: impl Into<String>) -> Self {
        Self {
            checks,
            version: version.into(),
        }
    }
}

#[async_trait]
impl HealthService for HealthAggregator {
    #[tracing::instrument(name = "Aggregate health", skip(self))]
    async fn aggregate_health(&self, timeout: Duration) -> AggregateHealth {
        let started = Instant::now();
        let deadline = started
            .checked_add(timeout)
            .unwrap_or_else(|| started + FAR_FUTURE);
        let (tx, mut rx) = mpsc::channel(self.checks.len().max(1));
        let mut probes = JoinSet::new();

        for (index, check) in self.checks.iter().enumerate() {
            let check = Arc::clone(check);
            let tx = tx.clone();
            probes.spawn(async move {
                let start = Instant::now();
                if let Ok(outcome) = timeout_at(deadline, check.check()).await {
                    let result = HealthCheckResult::new(check.component(), outcome, start.elapsed());
                    // the receiver is gone once the deadline has passed
                    let _ = tx.send((index, result)).await;
                }
            });
        }
        drop(tx);

        let mut slots: Vec<Option<HealthCheckResult>> = vec![None; self.checks.len()];
        let mut received = 0;
        while received < slots.len() {
            match timeout_at(deadline, rx.recv()).await {
                Ok(Some((index, result))) => {
                    slots[index] = Some(result);
                    received += 1;
                }
                Ok(None) | Err(_) => break,
            }
        }
        probes.abort_all();

        let checks: Vec<HealthCheckResult> = slots
            .into_iter()
            .zip(self.checks.iter())
            .map(|(slot, check)| {
                slot.unwrap_or_else(|| {
                    tracing::warn!(component = check.component(), "Health check timed out");
                    HealthCheckResult::timed_out(check.component(), started.elapsed())
                })
            })
            .collect();

        let health = AggregateHealth::new(checks, &self.version);
        tracing::info!(status = ?health.status, "Health checks completed");
        health
    }
}
