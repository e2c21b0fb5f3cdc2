//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for dates, NAV series and schemes.
//! These fixtures are consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::SchemeCode;
use domain_fund::{NavRecord, NavSeries, SchemeDetails, SchemeSummary};
use rust_decimal_macros::dec;

use crate::builders::NavSeriesBuilder;

/// Builds a date, panicking on invalid input
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Start of the standard SIP scenario (Jan 1, 2020)
    pub fn sip_start() -> NaiveDate {
        ymd(2020, 1, 1)
    }

    /// End of the standard SIP scenario (Mar 1, 2020)
    pub fn sip_end() -> NaiveDate {
        ymd(2020, 3, 1)
    }

    /// Valuation date used by period return tests (Jun 30, 2024)
    pub fn as_of() -> NaiveDate {
        ymd(2024, 6, 30)
    }
}

/// Fixture for NAV series
pub struct NavFixtures;

impl NavFixtures {
    /// Two points one year apart, doubling from 10 to 20
    pub fn doubling_over_a_year() -> NavSeries {
        NavSeries::new(vec![
            NavRecord::new(ymd(2021, 1, 1), dec!(20)),
            NavRecord::new(ymd(2020, 1, 1), dec!(10)),
        ])
    }

    /// One record per day through Q1 2020 at a constant price of 10
    pub fn flat_daily_2020_q1() -> NavSeries {
        NavSeriesBuilder::new()
            .daily(ymd(2020, 1, 1), ymd(2020, 3, 31), dec!(10))
            .build()
    }

    /// A single record
    pub fn single_record() -> NavSeries {
        NavSeries::new(vec![NavRecord::new(ymd(2024, 1, 15), dec!(42.5))])
    }

    /// Daily prices for the year to Jun 30, 2024 rising linearly from 100 to ~136.5
    pub fn rising_year_to_mid_2024() -> NavSeries {
        let start = ymd(2023, 6, 30);
        NavSeriesBuilder::new()
            .daily_with(start, TemporalFixtures::as_of(), |date| {
                dec!(100) + rust_decimal::Decimal::from((date - start).num_days()) / dec!(10)
            })
            .build()
    }
}

/// Fixture for upstream scheme payloads
pub struct SchemeFixtures;

impl SchemeFixtures {
    pub fn code() -> SchemeCode {
        SchemeCode::new(119551)
    }

    pub fn summaries() -> Vec<SchemeSummary> {
        vec![
            SchemeSummary {
                scheme_code: SchemeCode::new(100027),
                scheme_name: "Example Income Fund - Growth".to_string(),
                isin_growth: None,
                isin_div_reinvestment: None,
            },
            SchemeSummary {
                scheme_code: Self::code(),
                scheme_name: "Example Bluechip Fund - Direct Plan - Growth".to_string(),
                isin_growth: Some("INF000000001".to_string()),
                isin_div_reinvestment: None,
            },
        ]
    }

    /// Details for [`code`](Self::code) with a daily NAV history for 2020
    /// rising from 10 by 0.01 per day
    pub fn details() -> SchemeDetails {
        let start = ymd(2020, 1, 1);
        NavSeriesBuilder::new()
            .daily_with(start, ymd(2020, 12, 31), |date| {
                dec!(10) + rust_decimal::Decimal::from((date - start).num_days()) / dec!(100)
            })
            .build_details(Self::code(), "Example Bluechip Fund - Direct Plan - Growth")
    }
}
