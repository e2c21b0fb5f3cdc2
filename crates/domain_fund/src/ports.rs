//! Port for the upstream scheme data source
//!
//! The returns engine is fed by whatever implements [`SchemeSource`]: the
//! mfapi.in adapter, a caching decorator around it, or an in-memory fake in
//! tests.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, SchemeCode};

use crate::scheme::{SchemeDetails, SchemeSummary};

/// Source of scheme directories and NAV histories
#[async_trait]
pub trait SchemeSource: DomainPort + HealthCheckable {
    /// Lists every scheme the source knows about
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError>;

    /// Fetches metadata and NAV history for one scheme
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the scheme does not exist
    async fn scheme_details(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError>;
}
