pub mod health;
pub mod lead_magnet;
pub mod resource_email;
pub mod subscribe;
pub mod unsubscribe;

pub use health::{health, health_check};
pub use lead_magnet::lead_magnet;
pub use resource_email::resource_email;
pub use subscribe::subscribe;
pub use unsubscribe::{unsubscribe_form, unsubscribe_query};

use crate::domain::subscription::models::subscriber::SubscriptionOutcome;
use actix_web::HttpResponse;

/// 201 for a new subscriber, 200 for an existing one, 500 when the
/// provider could not complete the subscription.
fn outcome_response(outcome: SubscriptionOutcome) -> HttpResponse {
    if !outcome.success {
        HttpResponse::InternalServerError().json(outcome)
    } else if outcome.already_existed {
        HttpResponse::Ok().json(outcome)
    } else {
        HttpResponse::Created().json(outcome)
    }
}
