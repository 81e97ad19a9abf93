use actix_web::{web, HttpResponse};

use super::outcome_response;
use crate::domain::delivery::{models::ResourceDeliveryJob, ports::DeliveryService};
use crate::domain::subscription::{
    models::{
        email::SubscriberEmail,
        subscriber::{SubscriptionRequest, SubscriptionSource},
        tags::{resource_tag, split_tags},
    },
    ports::SubscriptionService,
};
use crate::inbound::http::{
    errors::AppError,
    state::{SharedDeliveryState, SharedSubscriptionState},
};

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LeadMagnetRequest {
    pub email: String,
    pub resource_id: String,
    pub file_id: String,
    #[serde(default)]
    pub tags: String,
}

/// Subscribes the reader with the resource tag and, once that worked, queues
/// the resource email.
#[tracing::instrument(
    name = "Processing lead magnet",
    skip(req, subscription_state, delivery_state),
    fields(subscriber_email = %req.email, resource_id = %req.resource_id)
)]
pub async fn lead_magnet<SS: SubscriptionService, DS: DeliveryService>(
    req: web::Json<LeadMagnetRequest>,
    subscription_state: web::Data<SharedSubscriptionState<SS>>,
    delivery_state: web::Data<SharedDeliveryState<DS>>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    if req.resource_id.trim().is_empty() || req.file_id.trim().is_empty() {
        return Err(AppError::ValidationError(
            "resourceId and fileId are required".into(),
        ));
    }
    let email = SubscriberEmail::parse(req.email)?;

    let mut tags = split_tags(&req.tags);
    tags.push(resource_tag(&req.resource_id));
    let request =
        SubscriptionRequest::new(email.clone(), SubscriptionSource::LeadMagnet).with_tags(tags);

    let outcome = subscription_state
        .subscription_service()
        .process_subscription(request)
        .await?;
    if !outcome.success {
        return Ok(outcome_response(outcome));
    }

    let job = ResourceDeliveryJob::new(
        email,
        req.resource_id,
        req.file_id,
        delivery_state.lead_magnet_delay_minutes(),
    );
    // the handle is dropped: the job outlives the request
    delivery_state.delivery_service().schedule(job);
    tracing::info!("Lead magnet processed successfully");

    Ok(HttpResponse::Ok().json(outcome))
}
