//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::CoreError;
use infra_mfapi::MfApiConfig;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// API configuration
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    /// Scheme directory URL of the upstream NAV source
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout_secs: u64,
    /// Time-to-live of cached upstream responses in seconds
    pub cache_ttl_secs: u64,
    /// Seconds between sweeps of expired cache entries
    pub cache_check_period_secs: u64,
    /// Include underlying error text in 500 responses
    pub expose_error_details: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            upstream_base_url: infra_mfapi::config::DEFAULT_BASE_URL.to_string(),
            upstream_timeout_secs: 10,
            cache_ttl_secs: 86_400,
            cache_check_period_secs: 3_600,
            expose_error_details: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.upstream_base_url.trim().is_empty() {
            return Err(CoreError::configuration("upstream_base_url must not be empty"));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(CoreError::configuration("upstream_timeout_secs must be positive"));
        }
        if self.cache_check_period_secs == 0 {
            return Err(CoreError::configuration("cache_check_period_secs must be positive"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream(&self) -> MfApiConfig {
        MfApiConfig::new(self.upstream_base_url.clone())
            .with_timeout(Duration::from_secs(self.upstream_timeout_secs))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_check_period(&self) -> Duration {
        Duration::from_secs(self.cache_check_period_secs)
    }
}
