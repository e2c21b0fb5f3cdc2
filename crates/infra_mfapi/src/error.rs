//! Upstream error types
//!
//! Failures talking to mfapi.in are classified here and then translated into
//! the port-level `PortError` the rest of the service understands.

use reqwest::StatusCode;
use thiserror::Error;

use core_kernel::PortError;

/// Retry delay assumed when a 429 response carries no usable `Retry-After`
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Errors that can occur while calling the upstream NAV source
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream does not know the requested resource
    #[error("{entity_type} with id '{id}' not found upstream")]
    NotFound { entity_type: String, id: String },

    /// The upstream asked us to slow down
    #[error("Upstream rate limit hit, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The upstream answered with a server error
    #[error("Upstream unavailable: HTTP {status}")]
    Unavailable { status: StatusCode },

    /// Any other non-success status
    #[error("Unexpected upstream status: HTTP {status}")]
    UnexpectedStatus { status: StatusCode },

    /// The request did not complete within the configured timeout
    #[error("Upstream request '{operation}' timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    /// The response body was not the expected JSON
    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be sent or the body could not be read
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Classifies a non-success HTTP status
    ///
    /// # Arguments
    ///
    /// * `status` - The response status
    /// * `retry_after` - Raw `Retry-After` header value, if any
    /// * `entity_type` - Kind of resource requested (e.g., "Scheme")
    /// * `id` - Identifier of the requested resource
    pub fn from_status(
        status: StatusCode,
        retry_after: Option<&str>,
        entity_type: &str,
        id: &str,
    ) -> Self {
        match status {
            StatusCode::NOT_FOUND => UpstreamError::NotFound {
                entity_type: entity_type.to_string(),
                id: id.to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited {
                retry_after_secs: retry_after
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            },
            status if status.is_server_error() => UpstreamError::Unavailable { status },
            status => UpstreamError::UnexpectedStatus { status },
        }
    }

    /// Classifies a transport error raised while running `operation`
    pub fn from_transport(error: reqwest::Error, operation: &str, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            UpstreamError::Timeout {
                operation: operation.to_string(),
                timeout_ms,
            }
        } else {
            UpstreamError::Request(error)
        }
    }
}

impl From<UpstreamError> for PortError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::NotFound { entity_type, id } => PortError::NotFound { entity_type, id },
            UpstreamError::RateLimited { retry_after_secs } => {
                PortError::RateLimited { retry_after_secs }
            }
            UpstreamError::Unavailable { status } => PortError::ServiceUnavailable {
                service: format!("mfapi.in (HTTP {})", status.as_u16()),
            },
            UpstreamError::Timeout {
                operation,
                timeout_ms,
            } => PortError::Timeout {
                operation,
                duration_ms: timeout_ms,
            },
            UpstreamError::Decode(e) => PortError::transformation(e.to_string()),
            other @ UpstreamError::UnexpectedStatus { .. } => PortError::connection(other.to_string()),
            UpstreamError::Request(e) => PortError::Connection {
                message: "Failed to reach mfapi.in".to_string(),
                source: Some(Box::new(e)),
            },
        }
    }
}
