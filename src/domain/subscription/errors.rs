use crate::domain::subscription::models::{email::EmailError, subscriber::SubscriptionSourceError};
use crate::domain::subscription::ports::ProviderError;

#[derive(thiserror::Error, Debug)]
pub enum SubscriptionError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Provider transport error: {0}")]
    TransportError(#[source] ProviderError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<ProviderError> for SubscriptionError {
    fn from(error: ProviderError) -> Self {
        Self::TransportError(error)
    }
}

impl From<EmailError> for SubscriptionError {
    fn from(value: EmailError) -> Self {
        Self::ValidationError(value.to_string())
    }
}

impl From<SubscriptionSourceError> for SubscriptionError {
    fn from(value: SubscriptionSourceError) -> Self {
        Self::ValidationError(value.to_string())
    }
}
