use actix_web::{web, HttpResponse};

use crate::domain::delivery::{
    models::{resource_title, ResourceEmail},
    ports::DeliveryService,
};
use crate::domain::subscription::models::email::SubscriberEmail;
use crate::inbound::http::{errors::AppError, state::SharedDeliveryState};

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEmailRequest {
    pub email: String,
    pub resource_id: String,
    #[serde(default)]
    pub resource_title: Option<String>,
    pub resource_link: String,
}

#[derive(serde::Serialize)]
struct EmailSent {
    success: bool,
    message: &'static str,
}

#[tracing::instrument(
    name = "Sending resource email",
    skip(req, state),
    fields(subscriber_email = %req.email, resource_id = %req.resource_id)
)]
pub async fn resource_email<DS: DeliveryService>(
    req: web::Json<ResourceEmailRequest>,
    state: web::Data<SharedDeliveryState<DS>>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    if req.resource_link.trim().is_empty() {
        return Err(AppError::ValidationError("resourceLink is required".into()));
    }
    let email = ResourceEmail {
        recipient: SubscriberEmail::parse(req.email)?,
        title: resource_title(&req.resource_id, req.resource_title.as_deref()),
        resource_id: req.resource_id,
        link: req.resource_link,
    };

    state.delivery_service().send_now(email).await?;

    Ok(HttpResponse::Ok().json(EmailSent {
        success: true,
        message: "Email sent.",
    }))
}
