//! Port abstractions
//!
//! The returns engine never talks to the network or to a cache directly.
//! Upstream data arrives through port traits (`SchemeSource` lives in
//! `domain_fund`), and adapters in `infra_mfapi` implement them. This module
//! holds what every port shares: the error vocabulary, the `DomainPort`
//! marker, the `TtlCache` capability and adapter health reporting.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait SchemeSource: DomainPort + HealthCheckable {
//!     async fn scheme_details(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError>;
//! }
//!
//! impl SchemeSource for MfApiClient { ... }
//! impl<S: SchemeSource> SchemeSource for CachedSchemeSource<S> { ... }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a port call, independent of the adapter behind it
#[derive(Debug, Error)]
pub enum PortError {
    /// The upstream does not know the entity
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The upstream could not be reached or answered unexpectedly
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// The upstream reported a server-side failure
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// The upstream answered with a body that could not be decoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Returns true if the same call may succeed later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker for port traits; implementors must be shareable across tasks
pub trait DomainPort: Send + Sync + 'static {}

/// Key-value store whose entries expire after a time-to-live
///
/// Handed to the adapters that cache, so tests can supply their own instance.
pub trait TtlCache<V>: Send + Sync {
    /// Returns a clone of the live value stored under `key`
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key` with the cache's default time-to-live
    fn set(&self, key: &str, value: V);

    fn set_with_ttl(&self, key: &str, value: V, ttl: Duration);

    /// Removes the entry stored under `key`, returning true if one existed
    fn remove(&self, key: &str) -> bool;

    /// Drops every expired entry and returns how many were removed
    fn purge_expired(&self) -> usize;

    /// Number of stored entries, expired ones included until purged
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reported state of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    /// Reachable but answering oddly
    Degraded,
    Unhealthy,
}

/// Outcome of one adapter health probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Round trip of the probe
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Builds a result stamped with the current time
    pub fn new(adapter_id: impl Into<String>, status: AdapterHealth, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns true unless the adapter reported itself unhealthy
    pub fn is_operational(&self) -> bool {
        !matches!(self.status, AdapterHealth::Unhealthy)
    }
}

/// Adapters that can probe their backing system
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_entity_and_id() {
        let error = PortError::not_found("Scheme", 119551);
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.to_string(), "Not found: Scheme with id 119551");
    }

    #[test]
    fn test_transient_classification() {
        let timeout = PortError::Timeout {
            operation: "scheme_details".to_string(),
            duration_ms: 10000,
        };
        assert!(timeout.is_transient());
        assert!(PortError::RateLimited { retry_after_secs: 60 }.is_transient());
        assert!(!PortError::transformation("bad json").is_transient());
    }

    #[test]
    fn test_health_result_operational() {
        let degraded = HealthCheckResult::new("mfapi", AdapterHealth::Degraded, 12);
        assert!(degraded.is_operational());

        let down = HealthCheckResult::new("mfapi", AdapterHealth::Unhealthy, 12)
            .with_message("timeout");
        assert!(!down.is_operational());
        assert_eq!(down.message.as_deref(), Some("timeout"));
    }
}
