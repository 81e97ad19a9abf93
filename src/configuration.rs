use std::time::Duration;

use config::{Config, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::subscription::service::TagPolicy;

pub const DEFAULT_RESOURCE_BASE_URL: &str = "https://drive.google.com/file/d";

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to load configuration")]
    Load(#[from] config::ConfigError),

    #[error("Failed to determine the current directory")]
    Io(#[from] std::io::Error),

    #[error("{0} is not a supported environment. Use either `local` or `production`.")]
    Environment(String),

    #[error("Missing required setting: {0}")]
    Missing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(ConfigurationError::Environment(other.into())),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub general: GeneralSettings,
    pub application: ApplicationSettings,
    pub site: SiteSettings,
    pub provider: ProviderSettings,
    pub email: EmailSettings,
    pub delivery: DeliverySettings,
    #[serde(default)]
    pub subscription: SubscriptionSettings,
    pub health: HealthSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GeneralSettings {
    pub log_level: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub version: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SiteSettings {
    pub title: String,
    pub domain: String,
    pub mail: String,
    pub url: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ProviderSettings {
    pub base_url: String,
    pub publication_id: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct EmailSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub from: String,
    #[serde(default)]
    pub user: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

impl EmailSettings {
    /// Host, user and password are all set.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.user.is_empty() && !self.password.expose_secret().is_empty()
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DeliverySettings {
    #[serde(default = "default_resource_base_url")]
    pub resource_base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub lead_magnet_delay_minutes: i64,
}

fn default_resource_base_url() -> String {
    DEFAULT_RESOURCE_BASE_URL.into()
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct SubscriptionSettings {
    #[serde(default)]
    pub tag_policy: TagPolicy,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct HealthSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    #[serde(default)]
    pub dependencies: Vec<DependencySettings>,
}

impl HealthSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// A TCP endpoint probed by the health checks, e.g. the datastore or cache.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct DependencySettings {
    pub component: String,
    pub address: String,
}

impl Settings {
    /// Production refuses to start without provider and SMTP credentials.
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigurationError> {
        if environment != Environment::Production {
            return Ok(());
        }
        if self.provider.api_key.expose_secret().is_empty() {
            return Err(ConfigurationError::Missing("provider.api_key".into()));
        }
        if self.provider.publication_id.is_empty() {
            return Err(ConfigurationError::Missing("provider.publication_id".into()));
        }
        if !self.email.is_complete() {
            return Err(ConfigurationError::Missing(
                "email.host, email.user and email.password".into(),
            ));
        }
        Ok(())
    }
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir()?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()?;

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(
            File::from(configuration_directory.join(environment.as_str())).required(true),
        )
        // APP_PROVIDER__API_KEY sets Settings.provider.api_key
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    settings.validate(environment)?;
    Ok(settings)
}
