//! Upstream client configuration

use std::time::Duration;

/// Public endpoint of the mfapi.in scheme directory
pub const DEFAULT_BASE_URL: &str = "https://api.mfapi.in/mf";

/// Request timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the upstream NAV source
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_mfapi::MfApiConfig;
///
/// let config = MfApiConfig::new("http://localhost:9000/mf")
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.scheme_url("119551"), "http://localhost:9000/mf/119551");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfApiConfig {
    /// Scheme directory URL; details live at `{base_url}/{code}`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl MfApiConfig {
    /// Creates a configuration for `base_url` with the default timeout
    ///
    /// A trailing slash on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of a single scheme's details
    pub fn scheme_url(&self, code: impl std::fmt::Display) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

impl Default for MfApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_api() {
        let config = MfApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = MfApiConfig::new("https://example.test/mf/");
        assert_eq!(config.scheme_url(100027), "https://example.test/mf/100027");
    }
}
