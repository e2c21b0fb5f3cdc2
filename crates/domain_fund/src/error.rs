//! Fund domain errors

use thiserror::Error;

/// Errors raised while building investment scenarios
///
/// Calculations themselves never fail with an error; they report "no
/// result" as `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FundError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown SIP frequency: {0}")]
    UnknownFrequency(String),

    #[error("Unknown lumpsum valuation: {0}")]
    UnknownValuation(String),
}
