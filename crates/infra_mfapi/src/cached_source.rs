//! Read-through caching for scheme sources
//!
//! Wraps any `SchemeSource` so the scheme directory and each scheme's details
//! are fetched at most once per cache lifetime. Errors are passed through and
//! never cached.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, SchemeCode, TtlCache};
use domain_fund::{SchemeDetails, SchemeSource, SchemeSummary};

/// Cache key of the scheme directory
pub const ALL_SCHEMES_KEY: &str = "all_schemes";

/// Values stored by [`CachedSchemeSource`]
///
/// Both payload kinds share one cache so a single sweeper and a single TTL
/// govern them.
#[derive(Debug, Clone)]
pub enum CachedPayload {
    Schemes(Arc<Vec<SchemeSummary>>),
    Details(Arc<SchemeDetails>),
}

/// A `SchemeSource` decorator that caches successful responses
pub struct CachedSchemeSource<S> {
    inner: S,
    cache: Arc<dyn TtlCache<CachedPayload>>,
}

impl<S: SchemeSource> CachedSchemeSource<S> {
    pub fn new(inner: S, cache: Arc<dyn TtlCache<CachedPayload>>) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops the cached details of one scheme
    pub fn invalidate(&self, code: &SchemeCode) -> bool {
        self.cache.remove(&code.cache_key())
    }
}

impl<S: SchemeSource> DomainPort for CachedSchemeSource<S> {}

#[async_trait]
impl<S: SchemeSource> HealthCheckable for CachedSchemeSource<S> {
    async fn health_check(&self) -> HealthCheckResult {
        self.inner.health_check().await
    }
}

#[async_trait]
impl<S: SchemeSource> SchemeSource for CachedSchemeSource<S> {
    #[instrument(skip(self))]
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError> {
        if let Some(CachedPayload::Schemes(schemes)) = self.cache.get(ALL_SCHEMES_KEY) {
            debug!("Scheme directory served from cache");
            return Ok(schemes.as_ref().clone());
        }

        let schemes = self.inner.list_schemes().await?;
        self.cache
            .set(ALL_SCHEMES_KEY, CachedPayload::Schemes(Arc::new(schemes.clone())));
        Ok(schemes)
    }

    #[instrument(skip(self, code), fields(scheme_code = %code))]
    async fn scheme_details(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError> {
        let key = code.cache_key();
        if let Some(CachedPayload::Details(details)) = self.cache.get(&key) {
            debug!("Scheme details served from cache");
            return Ok(details.as_ref().clone());
        }

        let details = self.inner.scheme_details(code).await?;
        self.cache
            .set(&key, CachedPayload::Details(Arc::new(details.clone())));
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryTtlCache;
    use std::time::Duration;
    use test_utils::{InMemorySchemeSource, SchemeFixtures};

    fn cached(source: InMemorySchemeSource) -> (CachedSchemeSource<InMemorySchemeSource>, Arc<MemoryTtlCache<CachedPayload>>) {
        let cache = Arc::new(MemoryTtlCache::<CachedPayload>::new(Duration::from_secs(60)));
        (CachedSchemeSource::new(source, cache.clone()), cache)
    }

    fn fixture_source() -> InMemorySchemeSource {
        InMemorySchemeSource::new()
            .with_schemes(SchemeFixtures::summaries())
            .with_details(SchemeFixtures::details())
    }

    #[tokio::test]
    async fn test_directory_is_fetched_once() {
        let (source, cache) = cached(fixture_source());

        let first = source.list_schemes().await.unwrap();
        let second = source.list_schemes().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(source.inner().list_calls(), 1);
        assert!(cache.get(ALL_SCHEMES_KEY).is_some());
    }

    #[tokio::test]
    async fn test_details_are_cached_per_scheme() {
        let (source, cache) = cached(fixture_source());
        let code = SchemeFixtures::code();

        let first = source.scheme_details(&code).await.unwrap();
        let second = source.scheme_details(&code).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.inner().details_calls(), 1);
        assert!(cache.get("scheme_119551").is_some());
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (source, cache) = cached(fixture_source());
        let unknown = SchemeCode::new(1);

        assert!(source.scheme_details(&unknown).await.unwrap_err().is_not_found());
        assert!(source.scheme_details(&unknown).await.is_err());
        assert_eq!(source.inner().details_calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_cache_serves_during_outage() {
        let (source, _cache) = cached(fixture_source());
        let code = SchemeFixtures::code();

        source.scheme_details(&code).await.unwrap();
        source.inner().set_unavailable(true);

        assert!(source.scheme_details(&code).await.is_ok());
        assert!(source.list_schemes().await.is_err());
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let cache = Arc::new(MemoryTtlCache::<CachedPayload>::new(Duration::ZERO));
        let source = CachedSchemeSource::new(fixture_source(), cache);
        let code = SchemeFixtures::code();

        source.scheme_details(&code).await.unwrap();
        source.scheme_details(&code).await.unwrap();

        assert_eq!(source.inner().details_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (source, _cache) = cached(fixture_source());
        let code = SchemeFixtures::code();

        source.scheme_details(&code).await.unwrap();
        assert!(source.invalidate(&code));
        source.scheme_details(&code).await.unwrap();

        assert_eq!(source.inner().details_calls(), 2);
    }
}
