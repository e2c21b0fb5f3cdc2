//! Kernel errors shared by the domain, adapter and API crates

use thiserror::Error;
use crate::temporal::TemporalError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// Path or body value that is not a bare decimal number
    #[error("Invalid scheme code: '{0}'")]
    InvalidSchemeCode(String),

    #[error("Scheme code out of range: '{0}'")]
    SchemeCodeOutOfRange(String),

    /// Settings the service cannot start with
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    /// Returns true if the error stems from caller input rather than setup
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CoreError::Configuration(_))
    }
}
