use actix_web::{web, HttpResponse};

use crate::domain::subscription::{models::email::SubscriberEmail, ports::SubscriptionService};
use crate::inbound::http::{errors::AppError, state::SharedSubscriptionState};

#[derive(serde::Deserialize, Debug)]
pub struct UnsubscribeRequest {
    pub email: String,
}

async fn unsubscribe<SS: SubscriptionService>(
    req: UnsubscribeRequest,
    state: &SharedSubscriptionState<SS>,
) -> Result<HttpResponse, AppError> {
    let email = SubscriberEmail::parse(req.email)?;
    let outcome = state.subscription_service().unsubscribe(&email).await?;

    if outcome.success {
        Ok(HttpResponse::Ok().json(outcome))
    } else {
        Ok(HttpResponse::Conflict().json(outcome))
    }
}

#[tracing::instrument(name = "Removing a subscriber", skip(state, form), fields(subscriber_email = %form.email))]
pub async fn unsubscribe_form<SS: SubscriptionService>(
    form: web::Form<UnsubscribeRequest>,
    state: web::Data<SharedSubscriptionState<SS>>,
) -> Result<HttpResponse, AppError> {
    unsubscribe(form.into_inner(), &state).await
}

#[tracing::instrument(name = "Removing a subscriber", skip(state, query), fields(subscriber_email = %query.email))]
pub async fn unsubscribe_query<SS: SubscriptionService>(
    query: web::Query<UnsubscribeRequest>,
    state: web::Data<SharedSubscriptionState<SS>>,
) -> Result<HttpResponse, AppError> {
    unsubscribe(query.into_inner(), &state).await
}
