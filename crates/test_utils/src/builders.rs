//! Test Data Builders
//!
//! Provides builder patterns for constructing NAV series with sensible
//! defaults. Points may be added in any order; the built series is always
//! most recent first, as the upstream source delivers it.

use chrono::{Days, NaiveDate};
use core_kernel::temporal::UPSTREAM_DATE_FORMAT;
use core_kernel::SchemeCode;
use domain_fund::{NavPoint, NavRecord, NavSeries, SchemeDetails, SchemeMeta};
use rust_decimal::Decimal;

/// Builder for NAV series and upstream scheme payloads
#[derive(Debug, Clone, Default)]
pub struct NavSeriesBuilder {
    points: Vec<(NaiveDate, Decimal)>,
}

impl NavSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single point
    pub fn point(mut self, date: NaiveDate, nav: Decimal) -> Self {
        self.points.push((date, nav));
        self
    }

    /// Adds one point per calendar day from `from` through `to` at a constant price
    pub fn daily(self, from: NaiveDate, to: NaiveDate, nav: Decimal) -> Self {
        self.daily_with(from, to, |_| nav)
    }

    /// Adds one point per calendar day from `from` through `to`, priced by `price`
    pub fn daily_with(mut self, from: NaiveDate, to: NaiveDate, price: impl Fn(NaiveDate) -> Decimal) -> Self {
        let mut cursor = from;
        while cursor <= to {
            self.points.push((cursor, price(cursor)));
            match cursor.checked_add_days(Days::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        self
    }

    /// Multiplies every price by `factor`
    pub fn scaled(mut self, factor: Decimal) -> Self {
        for (_, nav) in &mut self.points {
            *nav *= factor;
        }
        self
    }

    fn sorted_descending(&self) -> Vec<(NaiveDate, Decimal)> {
        let mut points = self.points.clone();
        points.sort_by(|a, b| b.0.cmp(&a.0));
        points
    }

    /// Builds the series, most recent first
    pub fn build(&self) -> NavSeries {
        self.sorted_descending()
            .into_iter()
            .map(|(date, nav)| NavRecord::new(date, nav))
            .collect()
    }

    /// Builds upstream points (`dd-mm-yyyy` dates, string NAVs), most recent first
    pub fn build_points(&self) -> Vec<NavPoint> {
        self.sorted_descending()
            .into_iter()
            .map(|(date, nav)| NavPoint::new(date.format(UPSTREAM_DATE_FORMAT).to_string(), nav.to_string().as_str()))
            .collect()
    }

    /// Builds a full upstream scheme payload
    pub fn build_details(&self, code: SchemeCode, name: &str) -> SchemeDetails {
        SchemeDetails {
            meta: SchemeMeta {
                fund_house: Some("Example Mutual Fund".to_string()),
                scheme_type: Some("Open Ended Schemes".to_string()),
                scheme_category: Some("Equity Scheme - Large Cap Fund".to_string()),
                scheme_code: Some(code),
                scheme_name: Some(name.to_string()),
                isin_growth: None,
                isin_div_reinvestment: None,
            },
            data: self.build_points(),
            status: Some("SUCCESS".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ymd;
    use rust_decimal_macros::dec;

    #[test]
    fn builds_descending_series() {
        let series = NavSeriesBuilder::new()
            .point(ymd(2024, 1, 1), dec!(10))
            .point(ymd(2024, 1, 3), dec!(12))
            .point(ymd(2024, 1, 2), dec!(11))
            .build();

        let dates: Vec<_> = series.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 3), ymd(2024, 1, 2), ymd(2024, 1, 1)]);
    }

    #[test]
    fn daily_is_inclusive() {
        let series = NavSeriesBuilder::new()
            .daily(ymd(2020, 1, 1), ymd(2020, 1, 31), dec!(10))
            .build();
        assert_eq!(series.len(), 31);
    }

    #[test]
    fn points_use_upstream_format() {
        let points = NavSeriesBuilder::new().point(ymd(2024, 3, 5), dec!(10.5)).build_points();
        assert_eq!(points[0].date, "05-03-2024");
        assert_eq!(NavSeries::from_points(&points).latest().map(|q| q.nav), Some(dec!(10.5)));
    }
}
