use std::time::Duration;

use async_trait::async_trait;

use super::models::{AggregateHealth, ProbeOutcome};

/// A probe of one dependent subsystem. Implementations never fail: problems
/// are reported through the outcome status.
#[async_trait]
pub trait HealthCheck: Send + Sync + 'static {
    fn component(&self) -> &str;

    async fn check(&self) -> ProbeOutcome;
}

#[async_trait]
pub trait HealthService: Send + Sync + 'static {
    async fn aggregate_health(&self, timeout: Duration) -> AggregateHealth;
}
