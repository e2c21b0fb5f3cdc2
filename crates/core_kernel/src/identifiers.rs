//! Strongly-typed identifiers for upstream entities
//!
//! Scheme codes arrive as path segments and JSON numbers; wrapping them in a
//! newtype keeps validation in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Numeric code identifying a mutual fund scheme at the upstream source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeCode(u32);

impl SchemeCode {
    /// Creates a scheme code from its numeric value
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Key under which this scheme's details are cached
    pub fn cache_key(&self) -> String {
        format!("scheme_{}", self.0)
    }
}

impl fmt::Display for SchemeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SchemeCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidSchemeCode(s.to_string()));
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| CoreError::SchemeCodeOutOfRange(s.to_string()))
    }
}

impl From<u32> for SchemeCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}
