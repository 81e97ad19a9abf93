use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::configuration::{EmailSettings, SiteSettings};
use crate::domain::delivery::models::ResourceEmail;
use crate::domain::delivery::ports::{NotifierError, ResourceNotifier};

mod template;

/// Sends resource emails over an authenticated STARTTLS relay, opening a
/// fresh connection for every message.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    settings: EmailSettings,
    site: SiteSettings,
}

impl SmtpNotifier {
    pub fn new(settings: EmailSettings, site: SiteSettings) -> Self {
        Self { settings, site }
    }

    fn mailbox(address: &str) -> Result<Mailbox, NotifierError> {
        address
            .parse()
            .map_err(|e| NotifierError::InvalidMessage(format!("{}: {}", address, e)))
    }

    fn message_id(&self) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let unique = uuid::Uuid::new_v4().simple().to_string();
        format!("<{}-{}@{}>", nanos, &unique[..8], self.site.domain)
    }

    fn build_message(&self, email: &ResourceEmail) -> Result<Message, NotifierError> {
        if email.link.trim().is_empty() {
            return Err(NotifierError::InvalidMessage(
                "resource link cannot be empty".into(),
            ));
        }
        let body = template::render_resource_email(&email.title, &email.link, &self.site);

        Message::builder()
            .from(Self::mailbox(&self.settings.from)?)
            .reply_to(Self::mailbox(&self.site.mail)?)
            .to(Self::mailbox(email.recipient.as_str())?)
            .subject(format!("Your {}", email.title))
            .message_id(Some(self.message_id()))
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| NotifierError::InvalidMessage(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifierError> {
        let credentials = Credentials::new(
            self.settings.user.clone(),
            self.settings.password.expose_secret().clone(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .context("Failed to configure the SMTP relay")?
            .port(self.settings.port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }
}

#[async_trait]
impl ResourceNotifier for SmtpNotifier {
    #[tracing::instrument(
        name = "Sending resource email",
        skip(self, email),
        fields(subscriber_email = %email.recipient, resource_id = %email.resource_id)
    )]
    async fn send_resource(&self, email: &ResourceEmail) -> Result<(), NotifierError> {
        if !self.settings.is_complete() {
            tracing::error!("Email configuration missing");
            return Err(NotifierError::Configuration(
                "host, user and password must be set".into(),
            ));
        }
        let message = self.build_message(email)?;
        self.transport()?
            .send(message)
            .await
            .context("Failed to send the resource email")?;
        tracing::info!("Email sent");
        Ok(())
    }
}
