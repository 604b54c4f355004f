//! Error responses in the shared envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::{Envelope, Message};
use crate::domain::DomainError;

const GENERIC_FAILURE: &str = "Something went wrong";

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Envelope<()>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Message>) -> Self {
        Self {
            status,
            body: Envelope {
                status: false,
                message: Some(message.into()),
                data: None,
                error: None,
            },
        }
    }

    /// Attach the underlying failure detail
    pub fn with_error(mut self, detail: impl Into<String>) -> Self {
        self.body.error = Some(detail.into());
        self
    }

    pub fn bad_request(message: impl Into<Message>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<Message>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<Message>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<Message>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<Message>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a domain failure; server-side failures report `context` as the
    /// message and the failure itself under `error`
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message }
            | DomainError::Conflict { message }
            | DomainError::InvalidId { message } => Self::bad_request(message),
            DomainError::FieldErrors { messages } => Self::bad_request(messages),
            DomainError::Configuration { message }
            | DomainError::Internal { message }
            | DomainError::Storage { message } => {
                error!(error = %message, "{}", context);
                Self::internal(context).with_error(message)
            }
        }
    }

    pub fn message(&self) -> Option<&Message> {
        self.body.message.as_ref()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, GENERIC_FAILURE)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body.message {
            Some(Message::Text(text)) => write!(f, "{}: {}", self.status, text),
            Some(Message::List(items)) => write!(f, "{}: {}", self.status, items.join("; ")),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}
