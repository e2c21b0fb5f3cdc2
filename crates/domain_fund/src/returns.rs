//! Point-to-point returns over a lookback period

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::{days_between, shift_months};

use crate::nav::{NavQuote, NavSeries};
use crate::{annualize, percent_change, round_percent, MIN_ANNUALIZATION_DAYS};

/// Lookback windows supported by the period return calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnPeriod {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl ReturnPeriod {
    pub const ALL: [ReturnPeriod; 4] = [
        ReturnPeriod::OneMonth,
        ReturnPeriod::ThreeMonths,
        ReturnPeriod::SixMonths,
        ReturnPeriod::OneYear,
    ];

    /// Calendar months covered by the period
    pub fn months(self) -> i32 {
        match self {
            ReturnPeriod::OneMonth => 1,
            ReturnPeriod::ThreeMonths => 3,
            ReturnPeriod::SixMonths => 6,
            ReturnPeriod::OneYear => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReturnPeriod::OneMonth => "1m",
            ReturnPeriod::ThreeMonths => "3m",
            ReturnPeriod::SixMonths => "6m",
            ReturnPeriod::OneYear => "1y",
        }
    }

    /// Looks a period up by name; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|period| period.as_str() == name)
    }

    /// Start of the lookback window ending on `as_of`
    ///
    /// Uses calendar month subtraction, so the day of month is kept and
    /// rolls over when the target month is shorter.
    pub fn boundary(self, as_of: NaiveDate) -> Option<NaiveDate> {
        shift_months(as_of, -self.months())
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return between two NAV records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "startNAV")]
    pub start_nav: Decimal,
    #[serde(rename = "endNAV")]
    pub end_nav: Decimal,
    /// Percent change, 2 decimal places
    pub simple_return: Decimal,
    /// Compound annual return in percent, 2 decimal places; absent for spans
    /// under 30 days
    pub annualized_return: Option<Decimal>,
}

impl PeriodReturn {
    /// Computes the return over `period` ending on `as_of`
    ///
    /// The start is the most recent NAV on or before the period boundary,
    /// or the oldest NAV when the series does not reach back that far. The
    /// end is always the latest NAV in the series.
    ///
    /// # Returns
    ///
    /// `None` if the series has no usable NAV
    pub fn calculate(series: &NavSeries, period: ReturnPeriod, as_of: NaiveDate) -> Option<Self> {
        let boundary = period.boundary(as_of)?;
        let start = series.on_or_before_or_oldest(boundary);
        let end = series.latest();

        match (start, end) {
            (Some(start), Some(end)) => Self::from_quotes(start, end),
            _ => {
                debug!(period = %period, "No usable NAV for period return");
                None
            }
        }
    }

    /// Same as [`calculate`](Self::calculate) with the period given by name
    ///
    /// An unrecognized name yields `None`.
    pub fn calculate_named(series: &NavSeries, period: &str, as_of: NaiveDate) -> Option<Self> {
        Self::calculate(series, ReturnPeriod::parse(period)?, as_of)
    }

    /// Computes the return between two arbitrary dates
    ///
    /// The start is the most recent NAV on or before `from` (oldest NAV as
    /// fallback); the end is the most recent NAV on or before `to`.
    pub fn between(series: &NavSeries, from: NaiveDate, to: NaiveDate) -> Option<Self> {
        let start = series.on_or_before_or_oldest(from)?;
        let end = series.on_or_before(to)?;
        Self::from_quotes(start, end)
    }

    fn from_quotes(start: NavQuote, end: NavQuote) -> Option<Self> {
        let simple_return = round_percent(percent_change(start.nav, end.nav)?);

        let days = days_between(start.date, end.date);
        let annualized_return = if days >= MIN_ANNUALIZATION_DAYS {
            let growth = end.nav.checked_div(start.nav)?;
            annualize(growth, 365.0 / days as f64).map(round_percent)
        } else {
            None
        };

        Some(Self {
            start_date: start.date,
            end_date: end.date,
            start_nav: start.nav,
            end_nav: end.nav,
            simple_return,
            annualized_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavRecord;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_names_round_trip() {
        for period in ReturnPeriod::ALL {
            assert_eq!(ReturnPeriod::parse(period.as_str()), Some(period));
        }
        assert_eq!(ReturnPeriod::parse("2y"), None);
        assert_eq!(ReturnPeriod::parse("1Y"), None);
    }

    #[test]
    fn test_boundary_uses_calendar_months() {
        assert_eq!(ReturnPeriod::OneYear.boundary(date(2024, 6, 15)), Some(date(2023, 6, 15)));
        assert_eq!(ReturnPeriod::OneMonth.boundary(date(2024, 3, 31)), Some(date(2024, 3, 2)));
    }

    #[test]
    fn test_short_span_is_not_annualized() {
        let series = NavSeries::new(vec![
            NavRecord::new(date(2024, 1, 20), dec!(11)),
            NavRecord::new(date(2024, 1, 1), dec!(10)),
        ]);
        let result = PeriodReturn::calculate(&series, ReturnPeriod::OneMonth, date(2024, 1, 20)).unwrap();

        assert_eq!(result.simple_return, dec!(10));
        assert_eq!(result.annualized_return, None);
    }
}
