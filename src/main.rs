use std::sync::Arc;

use anyhow::Context;
use newsletter_backend::configuration::get_configuration;
use newsletter_backend::domain::delivery::service::DeferredDelivery;
use newsletter_backend::domain::health::service::HealthAggregator;
use newsletter_backend::domain::subscription::service::Subscription;
use newsletter_backend::inbound::http::Application;
use newsletter_backend::outbound::health::build_health_checks;
use newsletter_backend::outbound::notifier::smtp_client::SmtpNotifier;
use newsletter_backend::outbound::provider::api_client::ProviderClient;
use newsletter_backend::outbound::telemetry::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger(
        "newsletter_backend",
        &configuration.general.log_level,
        std::io::stdout,
    )?;

    let provider = Arc::new(ProviderClient::new(configuration.provider.clone())?);
    let notifier = Arc::new(SmtpNotifier::new(
        configuration.email.clone(),
        configuration.site.clone(),
    ));

    let subscription_service =
        Subscription::new(Arc::clone(&provider), configuration.subscription.tag_policy);
    let delivery_service =
        DeferredDelivery::new(notifier, configuration.delivery.resource_base_url.clone());
    let health_service = HealthAggregator::new(
        build_health_checks(
            provider,
            configuration.email.clone(),
            &configuration.health.dependencies,
        ),
        configuration.application.version.clone(),
    );

    let application = Application::build(
        subscription_service,
        delivery_service,
        health_service,
        &configuration,
    )
    .await?;
    tracing::info!(port = application.port(), "Server started");

    application.run_until_stopped().await?;
    Ok(())
}
