//! Health DTOs

use serde::Serialize;

use core_kernel::HealthCheckResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<HealthCheckResult>,
}

impl HealthResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            upstream: None,
        }
    }

    pub fn with_upstream(mut self, upstream: HealthCheckResult) -> Self {
        self.upstream = Some(upstream);
        self
    }
}
