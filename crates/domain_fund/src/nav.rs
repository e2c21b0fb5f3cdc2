//! Net Asset Value (NAV) series
//!
//! This module models the NAV history delivered by the upstream source and
//! provides the lookups every return calculation is built on.
//!
//! The upstream delivers records most recent first. The series keeps that
//! order as given and never re-sorts it; all lookups scan in series order.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::parse_calendar_date;

/// A NAV value as it appears on the wire
///
/// The upstream sends strings such as `"10.23450"`; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavValue {
    Number(f64),
    Text(String),
}

impl NavValue {
    /// Parses the value, returning `None` for anything that is not a finite number
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NavValue::Number(value) if value.is_finite() => Decimal::from_f64(*value),
            NavValue::Number(_) => None,
            NavValue::Text(text) => {
                let trimmed = text.trim();
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .ok()
            }
        }
    }
}

impl From<&str> for NavValue {
    fn from(value: &str) -> Self {
        NavValue::Text(value.to_string())
    }
}

impl From<f64> for NavValue {
    fn from(value: f64) -> Self {
        NavValue::Number(value)
    }
}

/// A single `{date, nav}` entry as delivered by the upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavPoint {
    pub date: String,
    pub nav: NavValue,
}

impl NavPoint {
    pub fn new(date: impl Into<String>, nav: impl Into<NavValue>) -> Self {
        Self {
            date: date.into(),
            nav: nav.into(),
        }
    }
}

/// A dated NAV record whose price may not have parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRecord {
    /// Valuation date
    pub date: NaiveDate,
    /// NAV per unit; `None` when the upstream value could not be parsed
    pub nav: Option<Decimal>,
}

impl NavRecord {
    /// Creates a record with a parsed NAV
    pub fn new(date: NaiveDate, nav: Decimal) -> Self {
        Self { date, nav: Some(nav) }
    }

    /// Creates a record whose NAV could not be parsed
    pub fn unparsed(date: NaiveDate) -> Self {
        Self { date, nav: None }
    }

    /// Returns the record as a quote if its NAV is present and strictly positive
    pub fn quote(&self) -> Option<NavQuote> {
        self.nav
            .filter(|nav| nav.is_sign_positive() && !nav.is_zero())
            .map(|nav| NavQuote { date: self.date, nav })
    }

    /// Returns true if the record can be used as a basis of calculation
    pub fn is_usable(&self) -> bool {
        self.quote().is_some()
    }
}

/// A usable NAV: a dated, strictly positive price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavQuote {
    pub date: NaiveDate,
    pub nav: Decimal,
}

/// An ordered NAV history, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavSeries {
    records: Vec<NavRecord>,
}

impl NavSeries {
    /// Creates a series from records already in descending date order
    pub fn new(records: Vec<NavRecord>) -> Self {
        Self { records }
    }

    /// Builds a series from upstream points
    ///
    /// Points whose date cannot be parsed are dropped. Points whose NAV cannot
    /// be parsed are kept as unparsed records so the ordering is preserved.
    pub fn from_points(points: &[NavPoint]) -> Self {
        let mut dropped = 0usize;
        let records = points
            .iter()
            .filter_map(|point| match parse_calendar_date(&point.date) {
                Ok(date) => Some(NavRecord {
                    date,
                    nav: point.nav.to_decimal(),
                }),
                Err(_) => {
                    dropped += 1;
                    None
                }
            })
            .collect();

        if dropped > 0 {
            debug!(dropped, "Dropped NAV points with unparseable dates");
        }

        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[NavRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavRecord> {
        self.records.iter()
    }

    /// Usable records in series order
    pub fn quotes(&self) -> impl Iterator<Item = NavQuote> + '_ {
        self.records.iter().filter_map(NavRecord::quote)
    }

    /// The valuation point: the first usable record
    pub fn latest(&self) -> Option<NavQuote> {
        self.quotes().next()
    }

    /// The fallback start point: the last usable record
    pub fn oldest(&self) -> Option<NavQuote> {
        self.records.iter().rev().find_map(NavRecord::quote)
    }

    /// The first usable record, in series order, dated on or before `date`
    ///
    /// For a descending series this is the most recent NAV published on or
    /// before `date`.
    pub fn on_or_before(&self, date: NaiveDate) -> Option<NavQuote> {
        self.quotes().find(|quote| quote.date <= date)
    }

    /// The first record, usable or not: the upstream's current entry
    pub fn most_recent(&self) -> Option<&NavRecord> {
        self.records.first()
    }

    /// The first record, in series order, dated on or before `date`
    ///
    /// Unlike [`on_or_before`](Self::on_or_before) this does not look past a
    /// record whose NAV is unusable.
    pub fn record_on_or_before(&self, date: NaiveDate) -> Option<&NavRecord> {
        self.records.iter().find(|record| record.date <= date)
    }

    /// [`on_or_before`](Self::on_or_before), falling back to [`oldest`](Self::oldest)
    pub fn on_or_before_or_oldest(&self, date: NaiveDate) -> Option<NavQuote> {
        self.on_or_before(date).or_else(|| self.oldest())
    }
}

impl From<Vec<NavRecord>> for NavSeries {
    fn from(records: Vec<NavRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<NavRecord> for NavSeries {
    fn from_iter<I: IntoIterator<Item = NavRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
