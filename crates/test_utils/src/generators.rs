//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating NAV series that keep the
//! upstream invariants: strictly positive prices, strictly descending dates.

use chrono::{Days, NaiveDate};
use domain_fund::{NavRecord, NavSeries};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid NAV values (1.00 to 999.99)
pub fn nav_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for positive scale factors (0.01 to 100.00)
pub fn scale_factor_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for calendar dates between 2000 and 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..11_000u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|base| base.checked_add_days(Days::new(offset)))
            .unwrap_or(NaiveDate::MIN)
    })
}

/// Strategy for positive investment amounts (100 to 1,000,000)
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000i64).prop_map(Decimal::from)
}

/// Strategy for NAV series of 1 to `max_len` records, most recent first
///
/// Consecutive records are 1 to 10 days apart; the most recent record falls
/// on or before `latest`.
pub fn nav_series_strategy(latest: NaiveDate, max_len: usize) -> impl Strategy<Value = NavSeries> {
    prop::collection::vec((1u64..=10u64, nav_strategy()), 1..=max_len).prop_map(move |steps| {
        let mut date = latest;
        let mut records = Vec::with_capacity(steps.len());
        for (gap, nav) in steps {
            records.push(NavRecord::new(date, nav));
            date = date.checked_sub_days(Days::new(gap)).unwrap_or(NaiveDate::MIN);
        }
        NavSeries::new(records)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ymd;

    proptest! {
        #[test]
        fn nav_is_always_positive(nav in nav_strategy()) {
            prop_assert!(nav > Decimal::ZERO);
        }

        #[test]
        fn series_is_strictly_descending(series in nav_series_strategy(ymd(2024, 6, 30), 50)) {
            let dates: Vec<_> = series.iter().map(|r| r.date).collect();
            prop_assert!(dates.windows(2).all(|w| w[0] > w[1]));
            prop_assert!(series.iter().all(|r| r.is_usable()));
        }
    }
}
