use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;

use super::{AddTagsRequest, CreateSubscriptionRequest, ProviderClient};
use crate::domain::subscription::models::{
    email::SubscriberEmail,
    subscriber::{Subscriber, SubscriptionSource},
};
use crate::domain::subscription::ports::{Lookup, ProviderError, SubscriberProvider};

impl ProviderClient {
    async fn post_tag(&self, subscriber_id: &str, tag: &str) -> Result<Option<Subscriber>, ProviderError> {
        let url = self.publication_url(&["subscriptions", subscriber_id, "tags"])?;
        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(&AddTagsRequest { tags: [tag] })
            .send()
            .await
            .context("Failed to send the add tag request")?;
        Self::read_subscriber(response).await
    }
}

#[async_trait]
impl SubscriberProvider for ProviderClient {
    #[tracing::instrument(
        name = "Looking up subscriber",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    async fn lookup(&self, email: &SubscriberEmail) -> Result<Lookup, ProviderError> {
        let url = self.publication_url(&["subscriptions", "by_email", email.as_str()])?;
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .context("Failed to send the subscriber lookup request")?;

        match Self::read_subscriber(response).await? {
            Some(subscriber) => {
                tracing::info!(subscriber_id = %subscriber.id, "Subscriber exists");
                Ok(Lookup::Found(subscriber))
            }
            None => {
                tracing::info!("Subscriber not found");
                Ok(Lookup::NotFound)
            }
        }
    }

    #[tracing::instrument(
        name = "Creating subscriber",
        skip(self, email),
        fields(subscriber_email = %email, utm_source = %source)
    )]
    async fn create(
        &self,
        email: &SubscriberEmail,
        source: SubscriptionSource,
    ) -> Result<Option<Subscriber>, ProviderError> {
        let url = self.publication_url(&["subscriptions"])?;
        let body = CreateSubscriptionRequest {
            email: email.as_str(),
            utm_source: source.as_str(),
            reactivate_existing: true,
            send_welcome_email: true,
        };
        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(&body)
            .send()
            .await
            .context("Failed to send the create subscriber request")?;

        let created = Self::read_subscriber(response).await?;
        match &created {
            Some(subscriber) => tracing::info!(subscriber_id = %subscriber.id, "New subscriber created"),
            None => tracing::error!("Error subscribing user, no subscriber in API response"),
        }
        Ok(created)
    }

    #[tracing::instrument(name = "Adding tag to subscriber", skip(self))]
    async fn add_tag(&self, subscriber_id: &str, tag: &str) -> bool {
        if tag.is_empty() {
            tracing::warn!("Empty tag not added");
            return false;
        }
        match self.post_tag(subscriber_id, tag).await {
            Ok(Some(_)) => {
                tracing::info!("Tag added to subscriber");
                true
            }
            Ok(None) => {
                tracing::error!("Error adding tag to subscriber, no subscriber in API response");
                false
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Error adding tag to subscriber");
                false
            }
        }
    }

    #[tracing::instrument(name = "Deleting subscriber", skip(self))]
    async fn delete(&self, subscriber_id: &str) -> Result<(), ProviderError> {
        let url = self.publication_url(&["subscriptions", subscriber_id])?;
        let response = self
            .http_client
            .delete(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .context("Failed to send the delete subscriber request")?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}
