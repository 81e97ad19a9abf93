use validator::validate_email;

/// An email address that passed format validation.
///
/// The address is kept exactly as received: the provider treats emails as
/// case-sensitive identities, so no normalisation happens here.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<SubscriberEmail, EmailError> {
        if s.trim().is_empty() {
            return Err(EmailError::Empty);
        }
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(EmailError::InvalidFormat(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SubscriberEmail> for String {
    fn from(email: SubscriberEmail) -> Self {
        email.0
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SubscriberEmail::parse(value)
    }
}

impl TryFrom<&str> for SubscriberEmail {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        SubscriberEmail::parse(value.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Email cannot be empty.")]
    Empty,
    #[error("{0} is not a valid email")]
    InvalidFormat(String),
}
