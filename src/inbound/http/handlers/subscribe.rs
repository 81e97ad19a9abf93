use actix_web::{web, HttpResponse};

use super::outcome_response;
use crate::domain::subscription::{
    errors::SubscriptionError,
    models::{
        email::SubscriberEmail,
        subscriber::{SubscriptionRequest, SubscriptionSource},
        tags::split_tags,
    },
    ports::SubscriptionService,
};
use crate::inbound::http::{errors::AppError, state::SharedSubscriptionState};

/// `tags` may be repeated (`tags=a&tags=b`) and each value may also be a
/// comma-separated list.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(from = "Vec<(String, String)>")]
pub struct SubscribeForm {
    pub email: String,
    pub tags: Vec<String>,
    pub utm_source: String,
}

impl From<Vec<(String, String)>> for SubscribeForm {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut form = SubscribeForm::default();
        for (key, value) in pairs {
            match key.as_str() {
                "email" => form.email = value,
                "tags" => form.tags.extend(split_tags(&value)),
                "utm_source" => form.utm_source = value,
                _ => {}
            }
        }
        form
    }
}

impl TryFrom<SubscribeForm> for SubscriptionRequest {
    type Error = SubscriptionError;

    fn try_from(form: SubscribeForm) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(form.email)?;
        let source = match form.utm_source.trim() {
            "" => SubscriptionSource::default(),
            source => SubscriptionSource::parse(source)?,
        };
        Ok(SubscriptionRequest::new(email, source).with_tags(form.tags))
    }
}

#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(form, state),
    fields(
        subscriber_email = %form.email,
        utm_source = %form.utm_source,
    )
)]
pub async fn subscribe<SS: SubscriptionService>(
    form: web::Form<SubscribeForm>,
    state: web::Data<SharedSubscriptionState<SS>>,
) -> Result<HttpResponse, AppError> {
    let request: SubscriptionRequest = form.0.try_into()?;
    let outcome = state
        .subscription_service()
        .process_subscription(request)
        .await?;

    Ok(outcome_response(outcome))
}
