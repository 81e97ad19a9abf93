use async_trait::async_trait;

use super::models::{ResourceDeliveryJob, ResourceEmail};
use super::service::DeliveryHandle;

#[async_trait]
pub trait ResourceNotifier: Send + Sync + 'static {
    async fn send_resource(&self, email: &ResourceEmail) -> Result<(), NotifierError>;
}

#[derive(thiserror::Error, Debug)]
pub enum NotifierError {
    #[error("Email configuration is incomplete: {0}")]
    Configuration(String),

    #[error("Could not build the email message: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait DeliveryService: Send + Sync + 'static {
    /// Queues `job` in memory and returns at once. Failures of the eventual
    /// send are only logged.
    fn schedule(&self, job: ResourceDeliveryJob) -> DeliveryHandle;

    async fn send_now(&self, email: ResourceEmail) -> Result<(), NotifierError>;
}
