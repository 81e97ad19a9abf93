use anyhow::Context;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};

use crate::configuration::ProviderSettings;
use crate::domain::subscription::models::subscriber::Subscriber;
use crate::domain::subscription::ports::ProviderError;

mod subscriber_provider;

/// HTTP client for the subscriber directory of one publication.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http_client: Client,
    base_url: Url,
    publication_id: String,
    api_key: Secret<String>,
}

impl ProviderClient {
    pub fn new(settings: ProviderSettings) -> Result<Self, anyhow::Error> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid provider base url {}", settings.base_url))?;
        let http_client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build the provider http client")?;
        Ok(Self {
            http_client,
            base_url,
            publication_id: settings.publication_id,
            api_key: settings.api_key,
        })
    }

    /// `{base_url}/publications/{publication_id}/{segments...}`
    fn publication_url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Provider base url cannot be a base"))?
            .pop_if_empty()
            .extend(["publications", self.publication_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Reads the `{"data": {...}}` envelope the provider wraps every record
    /// in. A missing record, or one without an id, yields `None`.
    async fn read_subscriber(response: Response) -> Result<Option<Subscriber>, ProviderError> {
        let body = response
            .text()
            .await
            .context("Failed to read the provider response")?;
        let envelope: Envelope = serde_json::from_str(&body)
            .with_context(|| format!("Provider response is not valid JSON: {}", body))?;
        Ok(envelope.into_subscriber())
    }

    /// Status of the publication endpoint, used to probe reachability.
    #[tracing::instrument(name = "Checking provider publication", skip(self))]
    pub async fn publication_status(&self) -> Result<StatusCode, ProviderError> {
        let url = self.publication_url(&[])?;
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .context("Failed to reach the provider")?;
        Ok(response.status())
    }
}

#[derive(serde::Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<SubscriptionData>,
}

#[derive(serde::Deserialize)]
struct SubscriptionData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl Envelope {
    fn into_subscriber(self) -> Option<Subscriber> {
        self.data
            .filter(|data| !data.id.is_empty())
            .map(|data| Subscriber::new(data.id, data.email).with_tags(data.tags))
    }
}

#[derive(serde::Serialize)]
struct CreateSubscriptionRequest<'a> {
    email: &'a str,
    utm_source: &'a str,
    reactivate_existing: bool,
    send_welcome_email: bool,
}

#[derive(serde::Serialize)]
struct AddTagsRequest<'a> {
    tags: [&'a str; 1],
}
