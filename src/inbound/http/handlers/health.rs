use actix_web::{web, HttpResponse};

use crate::domain::health::ports::HealthService;
use crate::inbound::http::state::SharedHealthState;

/// Liveness only: answers as long as the server is up.
#[tracing::instrument(name = "Health check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Probes every dependency. Always 200; the verdict is in the body.
#[tracing::instrument(name = "Aggregated health handler", skip(state))]
pub async fn health<HS: HealthService>(state: web::Data<SharedHealthState<HS>>) -> HttpResponse {
    let report = state.health_service().aggregate_health(state.timeout()).await;
    HttpResponse::Ok().json(report)
}
