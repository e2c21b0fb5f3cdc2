//! mfapi.in REST Adapter
//!
//! Implements `SchemeSource` against the public mfapi.in API:
//!
//! - `GET {base_url}` returns the scheme directory
//! - `GET {base_url}/{code}` returns a scheme's metadata and NAV history
//!
//! # Error Handling
//!
//! Upstream failures are mapped to `PortError` variants:
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Undecodable bodies -> `PortError::Transformation`
//! - Other -> `PortError::Connection`
//!
//! Requests are not retried.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, SchemeCode,
};
use domain_fund::{SchemeDetails, SchemeSource, SchemeSummary};

use crate::config::MfApiConfig;
use crate::error::UpstreamError;

const ADAPTER_ID: &str = "mfapi-client";

/// HTTP client for the mfapi.in NAV source
///
/// # Example
///
/// ```rust,ignore
/// use infra_mfapi::{MfApiClient, MfApiConfig};
///
/// let client = MfApiClient::new(MfApiConfig::default())?;
/// let schemes = client.list_schemes().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MfApiClient {
    http: reqwest::Client,
    config: MfApiConfig,
}

impl MfApiClient {
    /// Creates a client with the configured per-request timeout
    pub fn new(config: MfApiConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &MfApiConfig {
        &self.config
    }

    /// Fetches `url` and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        operation: &str,
        entity_type: &str,
        id: &str,
    ) -> Result<T, UpstreamError> {
        let timeout_ms = self.config.timeout.as_millis() as u64;
        let started = Instant::now();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::from_transport(e, operation, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            warn!(%status, url, "Upstream returned an error status");
            return Err(UpstreamError::from_status(
                status,
                retry_after.as_deref(),
                entity_type,
                id,
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_transport(e, operation, timeout_ms))?;

        debug!(
            url,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Upstream response received"
        );

        Ok(serde_json::from_slice(&body)?)
    }
}

impl DomainPort for MfApiClient {}

#[async_trait]
impl HealthCheckable for MfApiClient {
    /// Sends a `HEAD` request to the scheme directory
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.http.head(&self.config.base_url).send().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.status().is_success() => {
                HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, latency_ms)
            }
            Ok(response) if response.status().is_server_error() => {
                HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, latency_ms)
                    .with_message(format!("HTTP {}", response.status()))
            }
            Ok(response) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Degraded, latency_ms)
                .with_message(format!("HTTP {}", response.status())),
            Err(e) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, latency_ms)
                .with_message(format!("Upstream unreachable: {}", e)),
        }
    }
}

#[async_trait]
impl SchemeSource for MfApiClient {
    #[instrument(skip(self))]
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError> {
        debug!("Fetching scheme directory");

        let schemes: Vec<SchemeSummary> = self
            .get_json(&self.config.base_url, "list_schemes", "SchemeDirectory", "all")
            .await?;

        debug!(count = schemes.len(), "Scheme directory fetched");
        Ok(schemes)
    }

    #[instrument(skip(self, code), fields(scheme_code = %code))]
    async fn scheme_details(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError> {
        debug!("Fetching scheme details");

        let id = code.to_string();
        let details: SchemeDetails = self
            .get_json(&self.config.scheme_url(code), "scheme_details", "Scheme", &id)
            .await?;

        if details.is_empty() {
            debug!("Upstream returned no metadata and no NAV history");
        }
        Ok(details)
    }
}
