// Centralized error-to-HTTP mapping.
//
// Services return `ApiError`; this is the single point where domain errors
// become wire format. Handlers never build error responses themselves.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use evently_contracts::{ErrorBody, ErrorMessage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or forbidden input fields; every violation is listed.
    #[error("validation failed")]
    Validation(Vec<String>),

    /// Write rejected because the record already exists.
    #[error("{0}")]
    Conflict(String),

    /// Credentials or token rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// No record with the requested id.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; detail is logged, never sent to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<evently_storage::StorageError> for ApiError {
    fn from(err: evently_storage::StorageError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message: ErrorMessage = match &self {
            ApiError::Validation(violations) => violations.clone().into(),
            ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg) => msg.clone().into(),
            ApiError::Internal(source) => {
                tracing::error!(error = %source, "request failed unexpectedly");
                "Internal server error".into()
            }
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
        };

        (status, Json(body)).into_response()
    }
}
