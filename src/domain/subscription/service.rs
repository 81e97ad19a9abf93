use async_trait::async_trait;
use std::sync::Arc;

use super::{
    errors::SubscriptionError,
    models::{
        email::SubscriberEmail,
        subscriber::{SubscriptionOutcome, SubscriptionRequest, UnsubscribeOutcome},
        tags::{tags_for_existing_subscriber, tags_for_new_subscriber},
    },
    ports::{Lookup, SubscriberProvider, SubscriptionService},
};

/// What to do with the remaining tags once one of them could not be applied.
/// Either way the subscription is reported as failed and tags already applied
/// stay on the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    #[default]
    AbortOnFailure,
    ContinueOnFailure,
}

#[derive(Debug)]
pub struct Subscription<P>
where
    P: SubscriberProvider,
{
    pub provider: Arc<P>,
    tag_policy: TagPolicy,
}

impl<P> Subscription<P>
where
    P: SubscriberProvider,
{
    pub fn new(provider: Arc<P>, tag_policy: TagPolicy) -> Self {
        Self {
            provider,
            tag_policy,
        }
    }

    /// Applies `tags` one call at a time. Returns `true` only if every tag
    /// was applied.
    #[tracing::instrument(name = "Applying tags to subscriber", skip(self, tags))]
    async fn apply_tags(&self, subscriber_id: &str, tags: &[String]) -> bool {
        let mut all_applied = true;
        for tag in tags {
            if self.provider.add_tag(subscriber_id, tag).await {
                continue;
            }
            tracing::error!(subscriber_id, tag = %tag, "Error adding tag to subscriber");
            all_applied = false;
            if self.tag_policy == TagPolicy::AbortOnFailure {
                break;
            }
        }
        all_applied
    }
}

#[async_trait]
impl<P> SubscriptionService for Subscription<P>
where
    P: SubscriberProvider,
{
    #[tracing::instrument(
        name = "Processing subscription",
        skip(self, req),
        fields(
            subscriber_email = %req.email,
            source = %req.source,
        )
    )]
    async fn process_subscription(
        &self,
        req: SubscriptionRequest,
    ) -> Result<SubscriptionOutcome, SubscriptionError> {
        if let Lookup::Found(subscriber) = self.provider.lookup(&req.email).await? {
            tracing::info!(subscriber_id = %subscriber.id, "Subscriber already exists");
            let tags = tags_for_existing_subscriber(&req.tags);
            if !self.apply_tags(&subscriber.id, &tags).await {
                return Ok(SubscriptionOutcome::tags_update_failed(true));
            }
            return Ok(SubscriptionOutcome::updated(subscriber.id));
        }

        let Some(subscriber) = self.provider.create(&req.email, req.source).await? else {
            tracing::error!("Provider did not return a subscriber for the new subscription");
            return Ok(SubscriptionOutcome::subscription_failed());
        };

        let tags = tags_for_new_subscriber(&req.tags);
        if !self.apply_tags(&subscriber.id, &tags).await {
            return Ok(SubscriptionOutcome::tags_update_failed(false));
        }
        tracing::info!(subscriber_id = %subscriber.id, "New subscriber created");
        Ok(SubscriptionOutcome::created(subscriber.id))
    }

    #[tracing::instrument(
        name = "Removing a subscriber",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    async fn unsubscribe(
        &self,
        email: &SubscriberEmail,
    ) -> Result<UnsubscribeOutcome, SubscriptionError> {
        let subscriber = match self.provider.lookup(email).await? {
            Lookup::Found(subscriber) => subscriber,
            Lookup::NotFound => {
                tracing::warn!("Subscriber not found");
                return Ok(UnsubscribeOutcome::not_subscribed());
            }
        };

        self.provider.delete(&subscriber.id).await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Error unsubscribing user");
            e
        })?;
        tracing::info!(subscriber_id = %subscriber.id, "User unsubscribed successfully");
        Ok(UnsubscribeOutcome::unsubscribed())
    }
}
