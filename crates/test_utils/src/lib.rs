//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! returns service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for NAV series construction
//! - `sources`: In-memory scheme source for API and adapter tests
//! - `assertions`: Custom assertion helpers for decimal results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod sources;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use sources::*;
pub use assertions::*;
pub use generators::*;
