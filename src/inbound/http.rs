use crate::configuration::Settings;
use crate::domain::delivery::ports::DeliveryService;
use crate::domain::health::ports::HealthService;
use crate::domain::subscription::ports::SubscriptionService;
use crate::inbound::http::handlers::{
    health, health_check, lead_magnet, resource_email, subscribe, unsubscribe_form,
    unsubscribe_query,
};
use crate::inbound::http::state::{SharedDeliveryState, SharedHealthState, SharedSubscriptionState};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod errors;
mod handlers;
pub mod state;

pub struct Application<SS, DS, HS>
where
    SS: SubscriptionService,
    DS: DeliveryService,
    HS: HealthService,
{
    port: u16,
    server: Server,
    subscription_state: SharedSubscriptionState<SS>,
    delivery_state: SharedDeliveryState<DS>,
    health_state: SharedHealthState<HS>,
}

fn run<SS: SubscriptionService, DS: DeliveryService, HS: HealthService>(
    listener: TcpListener,
    subscription_state: SharedSubscriptionState<SS>,
    delivery_state: SharedDeliveryState<DS>,
    health_state: SharedHealthState<HS>,
) -> Result<Server, std::io::Error> {
    let subscription_state = web::Data::new(subscription_state);
    let delivery_state = web::Data::new(delivery_state);
    let health_state = web::Data::new(health_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .app_data(health_state.clone())
            .route("/health", web::get().to(health::<HS>))
            .route("/healthz", web::get().to(health::<HS>))
            .route("/ready", web::get().to(health::<HS>))
            .app_data(subscription_state.clone())
            .app_data(delivery_state.clone())
            .service(
                web::scope("/api")
                    .route("/subscribe", web::post().to(subscribe::<SS>))
                    .route("/unsubscribe", web::post().to(unsubscribe_form::<SS>))
                    .route("/unsubscribe", web::get().to(unsubscribe_query::<SS>))
                    .route("/lead-magnet", web::post().to(lead_magnet::<SS, DS>))
                    .route("/resource-email", web::post().to(resource_email::<DS>)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

impl<SS, DS, HS> Application<SS, DS, HS>
where
    SS: SubscriptionService,
    DS: DeliveryService,
    HS: HealthService,
{
    pub async fn build(
        subscription_service: SS,
        delivery_service: DS,
        health_service: HS,
        configuration: &Settings,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(configuration.application.address())?;
        let port = listener.local_addr()?.port();

        let subscription_state = SharedSubscriptionState::new(subscription_service);
        let delivery_state = SharedDeliveryState::new(
            delivery_service,
            configuration.delivery.lead_magnet_delay_minutes,
        );
        let health_state = SharedHealthState::new(health_service, configuration.health.timeout());

        let server = run(
            listener,
            subscription_state.clone(),
            delivery_state.clone(),
            health_state.clone(),
        )?;

        Ok(Self {
            port,
            server,
            subscription_state,
            delivery_state,
            health_state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn subscription_state(&self) -> SharedSubscriptionState<SS> {
        self.subscription_state.clone()
    }

    pub fn delivery_state(&self) -> SharedDeliveryState<DS> {
        self.delivery_state.clone()
    }

    pub fn health_state(&self) -> SharedHealthState<HS> {
        self.health_state.clone()
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
