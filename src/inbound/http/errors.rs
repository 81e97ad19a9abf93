use crate::domain::delivery::ports::NotifierError;
use crate::domain::subscription::errors::SubscriptionError;
use crate::domain::subscription::models::email::EmailError;

use actix_web::HttpResponse;
use actix_web::{http::StatusCode, ResponseError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    const INVALID_REQUEST: &'static str = "Invalid request data.";
    const INTERNAL_ERROR: &'static str = "Internal server error.";
}

impl From<SubscriptionError> for AppError {
    fn from(error: SubscriptionError) -> Self {
        match error {
            SubscriptionError::ValidationError(s) => AppError::ValidationError(s),
            SubscriptionError::TransportError(e) => AppError::Unexpected(anyhow::Error::new(e)),
            SubscriptionError::Unexpected(e) => AppError::Unexpected(e),
        }
    }
}

impl From<NotifierError> for AppError {
    fn from(error: NotifierError) -> Self {
        match error {
            NotifierError::InvalidMessage(s) => AppError::ValidationError(s),
            NotifierError::Configuration(_) => AppError::Unexpected(anyhow::Error::new(error)),
            NotifierError::Unexpected(e) => AppError::Unexpected(e),
        }
    }
}

impl From<EmailError> for AppError {
    fn from(error: EmailError) -> Self {
        AppError::ValidationError(error.to_string())
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    success: bool,
    message: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(reason) => {
                tracing::warn!(reason = %reason, "Rejected request");
                Self::INVALID_REQUEST
            }
            AppError::Unexpected(e) => {
                tracing::error!(error.cause_chain = ?e, "Request failed");
                Self::INTERNAL_ERROR
            }
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            message,
        })
    }
}
