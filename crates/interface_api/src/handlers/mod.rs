//! Request handlers

pub mod calculators;
pub mod health;
pub mod scheme;

use core_kernel::SchemeCode;

use crate::error::ApiError;

/// Parses the `:code` path segment
fn parse_code(raw: &str) -> Result<SchemeCode, ApiError> {
    Ok(raw.parse::<SchemeCode>()?)
}
