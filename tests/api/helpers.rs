use async_trait::async_trait;
use newsletter_backend::configuration::get_configuration;
use newsletter_backend::domain::delivery::models::ResourceEmail;
use newsletter_backend::domain::delivery::ports::{NotifierError, ResourceNotifier};
use newsletter_backend::domain::delivery::service::DeferredDelivery;
use newsletter_backend::domain::health::service::HealthAggregator;
use newsletter_backend::domain::subscription::service::Subscription;
use newsletter_backend::inbound::http::Application;
use newsletter_backend::outbound::health::build_health_checks;
use newsletter_backend::outbound::provider::api_client::ProviderClient;
use newsletter_backend::outbound::telemetry::init_logger;
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PUBLICATION_ID: &str = "pub_test";

/// Stands in for the SMTP relay and keeps every email it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<ResourceEmail>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<ResourceEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceNotifier for RecordingNotifier {
    async fn send_resource(&self, email: &ResourceEmail) -> Result<(), NotifierError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub provider_server: MockServer,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/subscribe", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_unsubscribe(&self, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/unsubscribe", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_unsubscribe(&self, email: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(&format!("{}/api/unsubscribe", &self.address))
            .query(&[("email", email)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_lead_magnet(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/lead-magnet", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_resource_email(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/resource-email", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, route: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(&format!("{}{}", &self.address, route))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Tags the provider was asked to add, in request order.
    pub async fn tags_sent(&self) -> Vec<String> {
        self.provider_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path().ends_with("/tags"))
            .flat_map(|r| {
                let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                body["tags"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|t| t.as_str().unwrap().to_string())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub async fn mount_lookup_not_found(&self) {
        Mock::given(method("GET"))
            .and(path_regex(format!(
                r"^/publications/{}/subscriptions/by_email/.+$",
                PUBLICATION_ID
            )))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": [] })))
            .mount(&self.provider_server)
            .await;
    }

    pub async fn mount_lookup(&self, email: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/publications/{}/subscriptions/by_email/{}",
                PUBLICATION_ID, email
            )))
            .respond_with(response)
            .mount(&self.provider_server)
            .await;
    }

    pub async fn mount_create(&self, subscriber_id: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/publications/{}/subscriptions", PUBLICATION_ID)))
            .respond_with(ResponseTemplate::new(201).set_body_json(subscriber(subscriber_id)))
            .expect(expected_calls)
            .mount(&self.provider_server)
            .await;
    }

    pub async fn mount_tags(&self, subscriber_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!(
                "/publications/{}/subscriptions/{}/tags",
                PUBLICATION_ID, subscriber_id
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscriber(subscriber_id)))
            .mount(&self.provider_server)
            .await;
    }

    pub async fn mount_delete(&self, subscriber_id: &str, response: ResponseTemplate) {
        Mock::given(method("DELETE"))
            .and(path(format!(
                "/publications/{}/subscriptions/{}",
                PUBLICATION_ID, subscriber_id
            )))
            .respond_with(response)
            .expect(1)
            .mount(&self.provider_server)
            .await;
    }
}

/// Provider envelope around a subscriber record.
pub fn subscriber(subscriber_id: &str) -> serde_json::Value {
    json!({ "data": { "id": subscriber_id, "email": "ursula_le_guin@gmail.com", "tags": [] } })
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let c = get_configuration().expect("Failed to read configuration");
    let default_filter_level = c.general.log_level;
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        init_logger(&subscriber_name, &default_filter_level, std::io::stdout)
            .expect("Failed to install the test logger");
    } else {
        init_logger(&subscriber_name, &default_filter_level, std::io::sink)
            .expect("Failed to install the test logger");
    }
});

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);
    let provider_server = MockServer::start().await;
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.application.port = 0;
        c.provider.base_url = provider_server.uri();
        c.provider.publication_id = PUBLICATION_ID.into();
        c.provider.api_key = Secret::new("test-key".into());
        c.provider.timeout_milliseconds = 500;
        c.email.user = String::new();
        c.health.timeout_milliseconds = 1000;
        c.health.dependencies = vec![];
        c
    };

    let provider = Arc::new(
        ProviderClient::new(configuration.provider.clone()).expect("Failed to build provider"),
    );
    let notifier = Arc::new(RecordingNotifier::default());

    let subscription_service =
        Subscription::new(Arc::clone(&provider), configuration.subscription.tag_policy);
    let delivery_service = DeferredDelivery::new(
        Arc::clone(&notifier),
        configuration.delivery.resource_base_url.clone(),
    );
    let health_service = HealthAggregator::new(
        build_health_checks(provider, configuration.email.clone(), &[]),
        configuration.application.version.clone(),
    );

    let application = Application::build(
        subscription_service,
        delivery_service,
        health_service,
        &configuration,
    )
    .await
    .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://localhost:{}", application_port),
        provider_server,
        notifier,
    }
}
