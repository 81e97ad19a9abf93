use crate::domain::subscription::models::email::SubscriberEmail;

/// A resource email waiting to be sent after `delay_minutes`.
#[derive(Debug, Clone)]
pub struct ResourceDeliveryJob {
    pub email: SubscriberEmail,
    pub resource_id: String,
    pub file_id: String,
    pub delay_minutes: i64,
    pub title: Option<String>,
}

impl ResourceDeliveryJob {
    pub fn new(
        email: SubscriberEmail,
        resource_id: impl Into<String>,
        file_id: impl Into<String>,
        delay_minutes: i64,
    ) -> Self {
        Self {
            email,
            resource_id: resource_id.into(),
            file_id: file_id.into(),
            delay_minutes,
            title: None,
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }
}

/// Fully resolved resource email, ready for a notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEmail {
    pub recipient: SubscriberEmail,
    pub resource_id: String,
    pub title: String,
    pub link: String,
}

/// Title shown for a resource: the custom one when given, otherwise the id.
pub fn resource_title(resource_id: &str, custom_title: Option<&str>) -> String {
    match custom_title.map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => resource_id.to_string(),
    }
}

/// Public download link for a stored file.
pub fn resource_link(resource_base_url: &str, file_id: &str) -> String {
    format!(
        "{}/{}/view?usp=drive_link",
        resource_base_url.trim_end_matches('/'),
        file_id
    )
}
