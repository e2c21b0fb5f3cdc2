//! Fund Returns Domain
//!
//! This crate implements the returns engine for mutual fund NAV series:
//! point-to-point period returns, recurring contribution (SIP) simulation,
//! and lumpsum investment outcomes.
//!
//! # Key Concepts
//!
//! - **NAV**: Net Asset Value per unit, published daily by the fund house
//! - **NAV Series**: NAV records in upstream order, most recent first
//! - **SIP**: Systematic Investment Plan, a fixed amount invested periodically
//! - **Lumpsum**: A single investment valued at a later NAV
//!
//! # Percentages
//!
//! Returns are expressed in percent. Period returns and SIP returns are
//! rounded to 2 decimal places, half away from zero. Lumpsum returns keep
//! full precision.
//!
//! All calculations are pure functions of their inputs; "no result" is
//! reported as `None`.

pub mod nav;
pub mod returns;
pub mod sip;
pub mod lumpsum;
pub mod scheme;
pub mod ports;
pub mod error;

pub use nav::{NavPoint, NavQuote, NavRecord, NavSeries, NavValue};
pub use returns::{PeriodReturn, ReturnPeriod};
pub use sip::{SipFrequency, SipInvestment, SipPlan, SipResult};
pub use lumpsum::{LumpsumPlan, LumpsumResult, LumpsumValuation};
pub use scheme::{SchemeDetails, SchemeMeta, SchemeSummary};
pub use ports::SchemeSource;
pub use error::FundError;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Decimal places kept on rounded percentages
pub const PERCENT_PRECISION: u32 = 2;

/// Minimum elapsed days before a period return is annualized
pub const MIN_ANNUALIZATION_DAYS: i64 = 30;

/// Rounds a percentage to 2 decimal places, half away from zero
///
/// # Example
///
/// ```rust
/// use domain_fund::round_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_percent(dec!(12.345)), dec!(12.35));
/// assert_eq!(round_percent(dec!(-12.345)), dec!(-12.35));
/// ```
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PERCENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage change from `start` to `end`
///
/// # Returns
///
/// `(end - start) / start * 100`, or `None` when `start` is zero or the
/// arithmetic overflows
pub fn percent_change(start: Decimal, end: Decimal) -> Option<Decimal> {
    end.checked_sub(start)?
        .checked_div(start)?
        .checked_mul(dec!(100))
}

/// Compound annualization of a growth multiple
///
/// # Arguments
///
/// * `growth` - Ending value divided by starting value
/// * `exponent` - Periods per year, e.g. `365 / days` or `1 / years`
///
/// # Returns
///
/// `(growth ^ exponent - 1) * 100`, or `None` when the result is not finite
/// or does not fit a `Decimal`
pub fn annualize(growth: Decimal, exponent: f64) -> Option<Decimal> {
    let base = growth.to_f64()?;
    let annualized = (base.powf(exponent) - 1.0) * 100.0;
    if !annualized.is_finite() {
        return None;
    }
    Decimal::from_f64(annualized)
}

/// Units bought for `amount` at `nav`, unrounded
///
/// # Example
///
/// ```rust
/// use domain_fund::calculate_units;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(calculate_units(dec!(5000), dec!(10)), Some(dec!(500)));
/// assert_eq!(calculate_units(dec!(5000), dec!(0)), None);
/// ```
pub fn calculate_units(amount: Decimal, nav: Decimal) -> Option<Decimal> {
    amount.checked_div(nav)
}

/// Value of `units` at `nav`, unrounded
pub fn calculate_value(units: Decimal, nav: Decimal) -> Option<Decimal> {
    units.checked_mul(nav)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percent_midpoint() {
        assert_eq!(round_percent(dec!(0.005)), dec!(0.01));
        assert_eq!(round_percent(dec!(99.994)), dec!(99.99));
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(dec!(10), dec!(20)), Some(dec!(100)));
        assert_eq!(percent_change(dec!(20), dec!(10)), Some(dec!(-50)));
        assert_eq!(percent_change(dec!(0), dec!(10)), None);
    }

    #[test]
    fn test_annualize_doubling_over_one_year() {
        let annualized = annualize(dec!(2), 1.0).unwrap();
        assert_eq!(round_percent(annualized), dec!(100));
    }

    #[test]
    fn test_annualize_rejects_overflow() {
        assert_eq!(annualize(dec!(1000), 1.0e6), None);
    }

    #[test]
    fn test_units_and_value() {
        let units = calculate_units(dec!(1000), dec!(15.45)).unwrap();
        assert_eq!(units.round_dp(4), dec!(64.7249));
        assert_eq!(calculate_value(dec!(500), dec!(12)), Some(dec!(6000)));
    }
}
