//! Custom Test Assertions
//!
//! Provides assertion helpers for decimal results that give more meaningful
//! error messages than standard assertions.

use rust_decimal::Decimal;

/// Asserts that two Decimal values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a value carries no more than 2 decimal places
pub fn assert_two_decimal_places(value: Decimal) {
    assert_eq!(
        value,
        value.round_dp(2),
        "Expected at most 2 decimal places, got {}",
        value
    );
}

/// Asserts that a value is a percentage within `[low, high]`
pub fn assert_percent_between(value: Decimal, low: Decimal, high: Decimal) {
    assert!(
        value >= low && value <= high,
        "Expected percentage in [{}, {}], got {}",
        low,
        high,
        value
    );
}
