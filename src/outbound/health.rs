use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::configuration::{DependencySettings, EmailSettings};
use crate::domain::health::models::ProbeOutcome;
use crate::domain::health::ports::HealthCheck;
use crate::outbound::provider::api_client::ProviderClient;

/// Every check the service exposes: provider API, email configuration and
/// one TCP probe per configured dependency.
pub fn build_health_checks(
    provider: Arc<ProviderClient>,
    email: EmailSettings,
    dependencies: &[DependencySettings],
) -> Vec<Arc<dyn HealthCheck>> {
    let mut checks: Vec<Arc<dyn HealthCheck>> = vec![
        Arc::new(ProviderHealthCheck::new(provider)),
        Arc::new(EmailConfigCheck::new(email)),
    ];
    checks.extend(
        dependencies
            .iter()
            .map(|d| Arc::new(TcpProbe::new(&d.component, &d.address)) as Arc<dyn HealthCheck>),
    );
    checks
}

pub struct ProviderHealthCheck {
    client: Arc<ProviderClient>,
}

impl ProviderHealthCheck {
    pub fn new(client: Arc<ProviderClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthCheck for ProviderHealthCheck {
    fn component(&self) -> &str {
        "external_services"
    }

    async fn check(&self) -> ProbeOutcome {
        match self.client.publication_status().await {
            Ok(status) if status.is_success() => {
                ProbeOutcome::healthy("All external services operational")
            }
            Ok(status) => ProbeOutcome::degraded(format!("Provider answered with {}", status)),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Provider is unreachable");
                ProbeOutcome::unhealthy("Provider is unreachable")
            }
        }
    }
}

pub struct EmailConfigCheck {
    settings: EmailSettings,
}

impl EmailConfigCheck {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl HealthCheck for EmailConfigCheck {
    fn component(&self) -> &str {
        "email"
    }

    async fn check(&self) -> ProbeOutcome {
        if self.settings.is_complete() {
            ProbeOutcome::healthy("Email configuration validated")
        } else {
            ProbeOutcome::degraded("Incomplete email configuration")
        }
    }
}

/// Reachability of a TCP endpoint such as a datastore or a cache.
pub struct TcpProbe {
    component: String,
    address: String,
}

impl TcpProbe {
    pub fn new(component: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            address: address.into(),
        }
    }
}

#[async_trait]
impl HealthCheck for TcpProbe {
    fn component(&self) -> &str {
        &self.component
    }

    async fn check(&self) -> ProbeOutcome {
        match TcpStream::connect(&self.address).await {
            Ok(_) => ProbeOutcome::healthy(format!("{} connection successful", self.component)),
            Err(e) => {
                tracing::warn!(component = %self.component, error = %e, "Dependency is unreachable");
                ProbeOutcome::unhealthy(format!("{} is unreachable", self.component))
            }
        }
    }
}
