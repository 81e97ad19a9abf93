use std::time::Duration;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// What a single check reports, before the aggregator stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: HealthStatus,
    pub message: String,
}

impl ProbeOutcome {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: message.into(),
        }
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HealthCheckResult {
    pub component: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub latency_ms: u64,
}

impl HealthCheckResult {
    pub const TIMED_OUT: &'static str = "check timed out";

    pub fn new(component: impl Into<String>, outcome: ProbeOutcome, latency: Duration) -> Self {
        Self {
            component: component.into(),
            status: outcome.status,
            message: outcome.message,
            latency_ms: latency.as_millis() as u64,
        }
    }

    pub fn timed_out(component: impl Into<String>, latency: Duration) -> Self {
        Self::new(component, ProbeOutcome::unhealthy(Self::TIMED_OUT), latency)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AggregateHealth {
    pub status: HealthStatus,
    pub checks: Vec<HealthCheckResult>,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl AggregateHealth {
    pub fn new(checks: Vec<HealthCheckResult>, version: impl Into<String>) -> Self {
        Self {
            status: fold_status(checks.iter().map(|c| c.status)),
            checks,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }
}

/// Any unhealthy check makes the whole unhealthy, otherwise any degraded
/// check makes it degraded.
pub fn fold_status(statuses: impl IntoIterator<Item = HealthStatus>) -> HealthStatus {
    statuses
        .into_iter()
        .fold(HealthStatus::Healthy, |acc, status| match (acc, status) {
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        })
}
