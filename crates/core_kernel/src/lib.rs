//! Core Kernel - Foundational types and utilities for the returns service
//!
//! This crate provides the building blocks shared by the domain, adapter and
//! API crates:
//! - Calendar arithmetic for NAV date handling (month shifts with rollover)
//! - Scheme identifiers
//! - Port traits for upstream data sources and the TTL cache capability

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{DateRange, TemporalError, DAYS_PER_YEAR};
pub use identifiers::SchemeCode;
pub use ports::{
    PortError, DomainPort, TtlCache,
    AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
