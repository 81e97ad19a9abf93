use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::models::{resource_link, resource_title, ResourceDeliveryJob, ResourceEmail};
use super::ports::{DeliveryService, NotifierError, ResourceNotifier};

pub const MIN_DELAY_MINUTES: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Cancelled,
}

/// Handle over a scheduled delivery. Dropping it leaves the job running.
#[derive(Debug)]
pub struct DeliveryHandle {
    join: JoinHandle<DeliveryStatus>,
    token: CancellationToken,
}

impl DeliveryHandle {
    /// Stops the job if it has not sent yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub async fn wait(self) -> DeliveryStatus {
        match self.join.await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Email delivery task did not complete");
                DeliveryStatus::Failed
            }
        }
    }
}

/// Effective wait before a job sends: never shorter than one minute.
pub fn effective_delay(delay_minutes: i64) -> Duration {
    let minutes = delay_minutes.max(MIN_DELAY_MINUTES) as u64;
    Duration::from_secs(minutes.saturating_mul(60))
}

pub struct DeferredDelivery<N>
where
    N: ResourceNotifier,
{
    notifier: Arc<N>,
    resource_base_url: String,
    shutdown: CancellationToken,
}

impl<N> DeferredDelivery<N>
where
    N: ResourceNotifier,
{
    pub fn new(notifier: Arc<N>, resource_base_url: impl Into<String>) -> Self {
        Self {
            notifier,
            resource_base_url: resource_base_url.into(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Cancels every job still waiting.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn resource_email(&self, job: &ResourceDeliveryJob) -> ResourceEmail {
        ResourceEmail {
            recipient: job.email.clone(),
            resource_id: job.resource_id.clone(),
            title: resource_title(&job.resource_id, job.title.as_deref()),
            link: resource_link(&self.resource_base_url, &job.file_id),
        }
    }
}

#[async_trait]
impl<N> DeliveryService for DeferredDelivery<N>
where
    N: ResourceNotifier,
{
    fn schedule(&self, job: ResourceDeliveryJob) -> DeliveryHandle {
        if job.delay_minutes < MIN_DELAY_MINUTES {
            tracing::warn!(
                requested = job.delay_minutes,
                applied = MIN_DELAY_MINUTES,
                "Minimum delay enforced"
            );
        }
        let delay = effective_delay(job.delay_minutes);
        let email = self.resource_email(&job);
        let notifier = Arc::clone(&self.notifier);
        let token = self.shutdown.child_token();
        let task_token = token.clone();

        tracing::info!(
            subscriber_email = %email.recipient,
            resource_id = %email.resource_id,
            delay_secs = delay.as_secs(),
            "Resource email scheduled"
        );

        let span = tracing::info_span!(
            "Deliver resource email",
            subscriber_email = %email.recipient,
            resource_id = %email.resource_id
        );
        let join = tokio::spawn(
            async move {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        tracing::info!("Resource email cancelled before sending");
                        DeliveryStatus::Cancelled
                    }
                    _ = tokio::time::sleep(delay) => {
                        match notifier.send_resource(&email).await {
                            Ok(()) => {
                                tracing::info!("Resource email sent");
                                DeliveryStatus::Sent
                            }
                            Err(e) => {
                                tracing::warn!(error.cause_chain = ?e, "Email delivery issue");
                                DeliveryStatus::Failed
                            }
                        }
                    }
                }
            }
            .instrument(span),
        );

        DeliveryHandle { join, token }
    }

    #[tracing::instrument(
        name = "Send resource email now",
        skip(self, email),
        fields(subscriber_email = %email.recipient, resource_id = %email.resource_id)
    )]
    async fn send_now(&self, email: ResourceEmail) -> Result<(), NotifierError> {
        self.notifier.send_resource(&email).await?;
        tracing::info!("Resource email sent");
        Ok(())
    }
}
