//! Systematic Investment Plan (SIP) simulation
//!
//! A SIP invests a fixed amount at a fixed calendar interval. The simulator
//! walks a cursor date from the plan start, buying units at the most recent
//! NAV on or before each cursor date, and values the accumulated units at
//! the series' most recent record.
//!
//! # Schedule drift
//!
//! The cursor advances by calendar months with day-of-month rollover (see
//! [`core_kernel::temporal::shift_months`]). A plan starting on the 31st
//! buys on Jan 31, then Mar 3 (non-leap year), then Apr 3 and so on: once
//! the day has rolled over it stays rolled over.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::{shift_months, years_between};

use crate::error::FundError;
use crate::nav::NavSeries;
use crate::{annualize, calculate_units, calculate_value, percent_change, round_percent};

/// How often a SIP instalment is invested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SipFrequency {
    Monthly,
    Quarterly,
}

impl SipFrequency {
    /// Calendar months between instalments
    pub fn months(self) -> i32 {
        match self {
            SipFrequency::Monthly => 1,
            SipFrequency::Quarterly => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SipFrequency::Monthly => "monthly",
            SipFrequency::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for SipFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SipFrequency {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(SipFrequency::Monthly),
            "quarterly" => Ok(SipFrequency::Quarterly),
            other => Err(FundError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A recurring investment scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipPlan {
    /// Amount invested per instalment
    pub amount: Decimal,
    pub frequency: SipFrequency,
    /// First instalment date
    pub from: NaiveDate,
    /// Last date on which an instalment may fall (inclusive)
    pub to: NaiveDate,
}

impl SipPlan {
    /// Creates a plan, rejecting non-positive amounts
    pub fn new(
        amount: Decimal,
        frequency: SipFrequency,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, FundError> {
        if amount <= Decimal::ZERO {
            return Err(FundError::InvalidAmount(format!(
                "SIP amount must be positive, got {}",
                amount
            )));
        }
        Ok(Self { amount, frequency, from, to })
    }

    /// Instalment dates from `from` through `to`, inclusive
    pub fn schedule(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let step = self.frequency.months();
        std::iter::successors(Some(self.from), move |cursor| shift_months(*cursor, step))
            .take_while(move |cursor| *cursor <= self.to)
    }

    /// Simulates the plan against a NAV series
    ///
    /// Each instalment looks at the first record dated on or before its
    /// date; if there is none, or that record's NAV is unusable, the
    /// instalment is skipped. Older records are never consulted instead.
    ///
    /// # Returns
    ///
    /// `None` if the series is empty, its first record has no usable NAV to
    /// value the holding at, or a figure cannot be represented
    pub fn simulate(&self, series: &NavSeries) -> Option<SipResult> {
        let Some(latest) = series.most_recent().and_then(|record| record.quote()) else {
            debug!("Most recent NAV record is missing or unusable, no SIP valuation");
            return None;
        };

        let mut total_units = Decimal::ZERO;
        let mut total_invested = Decimal::ZERO;
        let mut investments = Vec::new();

        for cursor in self.schedule() {
            let Some(quote) = series.record_on_or_before(cursor).and_then(|record| record.quote()) else {
                debug!(date = %cursor, "No usable NAV on or before instalment date, skipping");
                continue;
            };

            let units = calculate_units(self.amount, quote.nav)?;
            total_units = total_units.checked_add(units)?;
            total_invested = total_invested.checked_add(self.amount)?;

            investments.push(SipInvestment {
                date: cursor,
                nav: quote.nav,
                units,
                amount: self.amount,
            });
        }

        let current_value = calculate_value(total_units, latest.nav)?;

        let invested = total_invested > Decimal::ZERO;
        let absolute_return = if invested {
            round_percent(percent_change(total_invested, current_value)?)
        } else {
            Decimal::ZERO
        };

        let years = years_between(self.from, self.to);
        let annualized_return = if invested && years > 0.0 {
            let growth = current_value.checked_div(total_invested)?;
            round_percent(annualize(growth, 1.0 / years)?)
        } else {
            Decimal::ZERO
        };

        Some(SipResult {
            total_invested,
            current_value,
            total_units,
            absolute_return,
            annualized_return,
            investments,
        })
    }
}

/// One executed instalment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipInvestment {
    /// Scheduled instalment date
    pub date: NaiveDate,
    /// NAV the units were bought at
    pub nav: Decimal,
    pub units: Decimal,
    pub amount: Decimal,
}

/// Outcome of a SIP simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub total_units: Decimal,
    /// Percent, 2 decimal places
    pub absolute_return: Decimal,
    /// Compound annual return in percent, 2 decimal places
    pub annualized_return: Decimal,
    pub investments: Vec<SipInvestment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("monthly".parse::<SipFrequency>().unwrap(), SipFrequency::Monthly);
        assert_eq!("quarterly".parse::<SipFrequency>().unwrap(), SipFrequency::Quarterly);
        assert!(matches!(
            "weekly".parse::<SipFrequency>(),
            Err(FundError::UnknownFrequency(_))
        ));
    }

    #[test]
    fn test_plan_rejects_non_positive_amount() {
        let result = SipPlan::new(dec!(0), SipFrequency::Monthly, date(2020, 1, 1), date(2020, 2, 1));
        assert!(matches!(result, Err(FundError::InvalidAmount(_))));
    }

    #[test]
    fn test_quarterly_schedule() {
        let plan = SipPlan::new(dec!(1000), SipFrequency::Quarterly, date(2020, 1, 15), date(2020, 12, 31))
            .unwrap();
        let dates: Vec<_> = plan.schedule().collect();

        assert_eq!(
            dates,
            vec![date(2020, 1, 15), date(2020, 4, 15), date(2020, 7, 15), date(2020, 10, 15)]
        );
    }

    #[test]
    fn test_inverted_range_has_empty_schedule() {
        let plan = SipPlan::new(dec!(1000), SipFrequency::Monthly, date(2021, 1, 1), date(2020, 1, 1))
            .unwrap();
        assert_eq!(plan.schedule().count(), 0);
    }
}
