use std::collections::BTreeSet;

use super::email::SubscriberEmail;

/// Opaque identifier issued by the provider.
pub type SubscriberId = String;

/// Request-scoped copy of a subscriber record owned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: String,
    pub tags: BTreeSet<String>,
}

impl Subscriber {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, T>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SubscriptionSourceError {
    #[error("Unknown subscription source: {0}")]
    UnknownSource(String),
}

/// Acquisition channel recorded on a new subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionSource {
    #[default]
    LandingPage,
    LeadMagnet,
    Newsletter,
}

impl SubscriptionSource {
    const LANDING_PAGE: &'static str = "landing_page";
    const LEAD_MAGNET: &'static str = "lead_magnet";
    const NEWSLETTER: &'static str = "newsletter";

    pub fn parse(source: &str) -> Result<SubscriptionSource, SubscriptionSourceError> {
        match source {
            Self::LANDING_PAGE => Ok(SubscriptionSource::LandingPage),
            Self::LEAD_MAGNET => Ok(SubscriptionSource::LeadMagnet),
            Self::NEWSLETTER => Ok(SubscriptionSource::Newsletter),
            _ => Err(SubscriptionSourceError::UnknownSource(source.into())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionSource::LandingPage => Self::LANDING_PAGE,
            SubscriptionSource::LeadMagnet => Self::LEAD_MAGNET,
            SubscriptionSource::Newsletter => Self::NEWSLETTER,
        }
    }
}

impl std::fmt::Display for SubscriptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub email: SubscriberEmail,
    pub source: SubscriptionSource,
    pub tags: Vec<String>,
}

impl SubscriptionRequest {
    pub fn new(email: SubscriberEmail, source: SubscriptionSource) -> Self {
        Self {
            email,
            source,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, T>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }
}

/// What the caller gets back from processing a subscription.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<SubscriberId>,
    pub already_existed: bool,
    pub message: String,
}

impl SubscriptionOutcome {
    pub const NEW_SUBSCRIBER: &'static str = "New subscriber added.";
    pub const SUBSCRIBER_UPDATED: &'static str = "Existing subscriber updated.";
    pub const TAGS_UPDATE_FAILED: &'static str = "Could not update the subscriber tags.";
    pub const SUBSCRIPTION_FAILED: &'static str = "Could not complete the subscription.";

    pub fn created(subscriber_id: SubscriberId) -> Self {
        Self {
            success: true,
            subscriber_id: Some(subscriber_id),
            already_existed: false,
            message: Self::NEW_SUBSCRIBER.into(),
        }
    }

    pub fn updated(subscriber_id: SubscriberId) -> Self {
        Self {
            success: true,
            subscriber_id: Some(subscriber_id),
            already_existed: true,
            message: Self::SUBSCRIBER_UPDATED.into(),
        }
    }

    pub fn tags_update_failed(already_existed: bool) -> Self {
        Self {
            success: false,
            subscriber_id: None,
            already_existed,
            message: Self::TAGS_UPDATE_FAILED.into(),
        }
    }

    pub fn subscription_failed() -> Self {
        Self {
            success: false,
            subscriber_id: None,
            already_existed: false,
            message: Self::SUBSCRIPTION_FAILED.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UnsubscribeOutcome {
    pub success: bool,
    pub message: String,
}

impl UnsubscribeOutcome {
    pub const UNSUBSCRIBED: &'static str = "Your subscription has been cancelled.";
    pub const NOT_SUBSCRIBED: &'static str = "This email is not subscribed.";

    pub fn unsubscribed() -> Self {
        Self {
            success: true,
            message: Self::UNSUBSCRIBED.into(),
        }
    }

    pub fn not_subscribed() -> Self {
        Self {
            success: false,
            message: Self::NOT_SUBSCRIBED.into(),
        }
    }
}
