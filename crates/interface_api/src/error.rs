//! API error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use core_kernel::{CoreError, PortError, TemporalError};
use domain_fund::FundError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An upstream call failed; `details` is only filled when exposure is enabled
    #[error("Upstream failure: {message}")]
    Upstream {
        message: String,
        details: Option<Vec<String>>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a port failure raised while `context` was being served
    ///
    /// `NotFound` becomes a 404; anything else becomes a 500 carrying
    /// `context` as its message and, when `expose` is set, the error text.
    pub fn from_port(error: PortError, context: &str, expose: bool) -> Self {
        match error {
            PortError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{} {} not found", entity_type, id))
            }
            other => {
                tracing::error!(error = %other, context, "Upstream call failed");
                ApiError::Upstream {
                    message: context.to_string(),
                    details: expose.then(|| vec![other.to_string()]),
                }
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Upstream { message, details } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", message, details)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        let message = match err {
            FundError::UnknownFrequency(_) => "Frequency must be monthly or quarterly".to_string(),
            FundError::UnknownValuation(_) => "Valuation must be latest or as_of_end".to_string(),
            FundError::InvalidAmount(_) => "Amount must be a positive number".to_string(),
            other => other.to_string(),
        };
        ApiError::BadRequest(message)
    }
}

impl From<TemporalError> for ApiError {
    fn from(err: TemporalError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Temporal(err) => err.into(),
            CoreError::Configuration(msg) => ApiError::Internal(msg),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        messages.sort();
        ApiError::BadRequest(messages.join("; "))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
