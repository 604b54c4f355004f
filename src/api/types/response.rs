//! Response envelope shared by every endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Either a single message or one message per offending field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for Message {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// `{status, message?, data?, error?}` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Successful response with status code
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with data only
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope {
                status: true,
                message: None,
                data: Some(data),
                error: None,
            },
        }
    }

    /// 201 for newly created records
    pub fn created(data: T) -> Self {
        Self::ok(data).with_status(StatusCode::CREATED)
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl ApiResponse<()> {
    /// 200 carrying only a message
    pub fn message(message: impl Into<Message>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope {
                status: true,
                message: Some(message.into()),
                data: None,
                error: None,
            },
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
