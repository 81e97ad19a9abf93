use async_trait::async_trait;

use super::errors::SubscriptionError;
use super::models::{
    email::SubscriberEmail,
    subscriber::{
        Subscriber, SubscriptionOutcome, SubscriptionRequest, SubscriptionSource,
        UnsubscribeOutcome,
    },
};

/// Result of looking a subscriber up by email. Absence is a valid answer,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Subscriber),
    NotFound,
}

#[async_trait]
/// The external subscriber directory. Every call is a single request with no
/// retry.
pub trait SubscriberProvider: Send + Sync + 'static {
    /// Looks a subscriber up by its exact email.
    async fn lookup(&self, email: &SubscriberEmail) -> Result<Lookup, ProviderError>;

    /// Creates a subscriber. `None` means the provider accepted the call but
    /// did not hand back a usable record.
    async fn create(
        &self,
        email: &SubscriberEmail,
        source: SubscriptionSource,
    ) -> Result<Option<Subscriber>, ProviderError>;

    /// Attaches one tag. Returns `false` for an empty tag without touching
    /// the network, and for any failure talking to the provider.
    async fn add_tag(&self, subscriber_id: &str, tag: &str) -> bool;

    /// Removes the whole subscriber record.
    async fn delete(&self, subscriber_id: &str) -> Result<(), ProviderError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Provider answered with unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[async_trait]
pub trait SubscriptionService: Send + Sync + 'static {
    async fn process_subscription(
        &self,
        req: SubscriptionRequest,
    ) -> Result<SubscriptionOutcome, SubscriptionError>;

    async fn unsubscribe(
        &self,
        email: &SubscriberEmail,
    ) -> Result<UnsubscribeOutcome, SubscriptionError>;
}
