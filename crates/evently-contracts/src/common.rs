// Response envelope and error body shared by every endpoint.
//
// Successful responses are wrapped as `{ data, meta }`; errors use the flat
// `{ statusCode, message, error }` shape and are never wrapped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope applied to every successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// The handler's result.
    pub data: T,
    /// Request-scoped metadata.
    pub meta: ResponseMeta,
}

/// Metadata attached to the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Correlation id propagated from (or generated for) this request.
    pub correlation_id: String,
    /// Instant the response was constructed, RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T, correlation_id: impl Into<String>) -> Self {
        Self {
            data,
            meta: ResponseMeta {
                correlation_id: correlation_id.into(),
                timestamp: Utc::now(),
            },
        }
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: ErrorMessage,
    pub error: String,
}

/// A single error message or an ordered list of validation messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl From<String> for ErrorMessage {
    fn from(msg: String) -> Self {
        ErrorMessage::Single(msg)
    }
}

impl From<&str> for ErrorMessage {
    fn from(msg: &str) -> Self {
        ErrorMessage::Single(msg.to_string())
    }
}

impl From<Vec<String>> for ErrorMessage {
    fn from(msgs: Vec<String>) -> Self {
        ErrorMessage::Many(msgs)
    }
}

/// Plain acknowledgement payload (`{ message }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
