//! Upstream NAV Source Infrastructure
//!
//! This crate connects the returns engine to the public mfapi.in REST API and
//! provides the in-memory cache that keeps upstream traffic down.
//!
//! # Components
//!
//! - [`MfApiClient`]: `SchemeSource` adapter over `reqwest`
//! - [`MemoryTtlCache`]: `TtlCache` implementation with per-entry expiry
//! - [`CachedSchemeSource`]: read-through caching decorator for any `SchemeSource`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_mfapi::{CachedSchemeSource, MemoryTtlCache, MfApiClient, MfApiConfig};
//!
//! let client = MfApiClient::new(MfApiConfig::default())?;
//! let cache = Arc::new(MemoryTtlCache::default());
//! let source = CachedSchemeSource::new(client, cache);
//! let details = source.scheme_details(&"119551".parse()?).await?;
//! ```

pub mod config;
pub mod error;
pub mod client;
pub mod cache;
pub mod cached_source;

pub use config::MfApiConfig;
pub use error::UpstreamError;
pub use client::MfApiClient;
pub use cache::{spawn_expiry_sweeper, MemoryTtlCache, DEFAULT_CHECK_PERIOD, DEFAULT_TTL};
pub use cached_source::{CachedPayload, CachedSchemeSource, ALL_SCHEMES_KEY};
