//! In-memory Scheme Source
//!
//! A `SchemeSource` backed by fixed data, with call counters and a switch to
//! simulate an upstream outage. Stands in for the mfapi.in adapter in API
//! and caching tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, SchemeCode,
};
use domain_fund::{SchemeDetails, SchemeSource, SchemeSummary};

/// Scheme source serving fixed data from memory
#[derive(Debug, Default)]
pub struct InMemorySchemeSource {
    schemes: Vec<SchemeSummary>,
    details: HashMap<SchemeCode, SchemeDetails>,
    unavailable: AtomicBool,
    list_calls: AtomicUsize,
    details_calls: AtomicUsize,
}

impl InMemorySchemeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme directory
    pub fn with_schemes(mut self, schemes: Vec<SchemeSummary>) -> Self {
        self.schemes = schemes;
        self
    }

    /// Adds scheme details, keyed by their `meta.scheme_code`
    ///
    /// # Panics
    ///
    /// Panics if the details carry no scheme code
    pub fn with_details(mut self, details: SchemeDetails) -> Self {
        let code = details.meta.scheme_code.expect("fixture details need a scheme code");
        self.details.insert(code, details);
        self
    }

    /// Makes every call fail with `ServiceUnavailable` until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `list_schemes` calls served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `scheme_details` calls served so far
    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::ServiceUnavailable {
                service: "in-memory".to_string(),
            });
        }
        Ok(())
    }
}

impl DomainPort for InMemorySchemeSource {}

#[async_trait]
impl HealthCheckable for InMemorySchemeSource {
    async fn health_check(&self) -> HealthCheckResult {
        let status = if self.unavailable.load(Ordering::SeqCst) {
            AdapterHealth::Unhealthy
        } else {
            AdapterHealth::Healthy
        };
        HealthCheckResult::new("in-memory", status, 0)
    }
}

#[async_trait]
impl SchemeSource for InMemorySchemeSource {
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.schemes.clone())
    }

    async fn scheme_details(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.details
            .get(code)
            .cloned()
            .ok_or_else(|| PortError::not_found("Scheme", code))
    }
}
