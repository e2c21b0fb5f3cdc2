//! One-time (lumpsum) investment outcomes

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::years_between;

use crate::error::FundError;
use crate::nav::NavSeries;
use crate::{annualize, calculate_units, calculate_value, percent_change};

/// Which NAV a lumpsum holding is valued at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LumpsumValuation {
    /// The latest NAV in the series, whatever the plan's end date
    #[default]
    Latest,
    /// The most recent NAV on or before the plan's end date
    AsOfEnd,
}

impl LumpsumValuation {
    pub fn as_str(self) -> &'static str {
        match self {
            LumpsumValuation::Latest => "latest",
            LumpsumValuation::AsOfEnd => "as_of_end",
        }
    }
}

impl fmt::Display for LumpsumValuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LumpsumValuation {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(LumpsumValuation::Latest),
            "as_of_end" => Ok(LumpsumValuation::AsOfEnd),
            other => Err(FundError::UnknownValuation(other.to_string())),
        }
    }
}

/// A single investment scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpsumPlan {
    pub amount: Decimal,
    /// Purchase date
    pub from: NaiveDate,
    /// End date; only consulted with [`LumpsumValuation::AsOfEnd`]
    pub to: NaiveDate,
    pub valuation: LumpsumValuation,
}

impl LumpsumPlan {
    /// Creates a plan valued at the latest NAV, rejecting non-positive amounts
    pub fn new(amount: Decimal, from: NaiveDate, to: NaiveDate) -> Result<Self, FundError> {
        if amount <= Decimal::ZERO {
            return Err(FundError::InvalidAmount(format!(
                "Lumpsum amount must be positive, got {}",
                amount
            )));
        }
        Ok(Self {
            amount,
            from,
            to,
            valuation: LumpsumValuation::default(),
        })
    }

    pub fn with_valuation(mut self, valuation: LumpsumValuation) -> Self {
        self.valuation = valuation;
        self
    }

    /// Values the investment against a NAV series
    ///
    /// Units are bought at the most recent NAV on or before `from` (the
    /// oldest NAV if the series starts later) and valued per `valuation`.
    /// Nothing is rounded.
    ///
    /// # Returns
    ///
    /// `None` if either NAV cannot be resolved or a figure cannot be
    /// represented. The annualized return is `None` when purchase and
    /// valuation fall on the same date.
    pub fn evaluate(&self, series: &NavSeries) -> Option<LumpsumResult> {
        let start = series.on_or_before_or_oldest(self.from)?;
        let end = match self.valuation {
            LumpsumValuation::Latest => series.latest(),
            LumpsumValuation::AsOfEnd => series.on_or_before(self.to),
        };
        let Some(end) = end else {
            debug!(valuation = %self.valuation, to = %self.to, "No valuation NAV for lumpsum");
            return None;
        };

        let units = calculate_units(self.amount, start.nav)?;
        let current_value = calculate_value(units, end.nav)?;
        let absolute_return = percent_change(self.amount, current_value)?;

        let years = years_between(start.date, end.date);
        let annualized_return = if years > 0.0 {
            let growth = current_value.checked_div(self.amount)?;
            annualize(growth, 1.0 / years)
        } else {
            None
        };

        Some(LumpsumResult {
            total_invested: self.amount,
            current_value,
            units,
            absolute_return,
            annualized_return,
            start_nav: start.nav,
            end_nav: end.nav,
            start_date: start.date,
            end_date: end.date,
        })
    }
}

/// Outcome of a lumpsum investment, unrounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResult {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub units: Decimal,
    /// Percent
    pub absolute_return: Decimal,
    /// Compound annual return in percent; absent over a zero-day span
    pub annualized_return: Option<Decimal>,
    #[serde(rename = "startNAV")]
    pub start_nav: Decimal,
    #[serde(rename = "endNAV")]
    pub end_nav: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
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
    fn test_valuation_parsing() {
        assert_eq!("latest".parse::<LumpsumValuation>().unwrap(), LumpsumValuation::Latest);
        assert_eq!("as_of_end".parse::<LumpsumValuation>().unwrap(), LumpsumValuation::AsOfEnd);
        assert!("today".parse::<LumpsumValuation>().is_err());
    }

    #[test]
    fn test_plan_rejects_negative_amount() {
        let result = LumpsumPlan::new(dec!(-1), date(2020, 1, 1), date(2021, 1, 1));
        assert!(matches!(result, Err(FundError::InvalidAmount(_))));
    }

    #[test]
    fn test_same_day_is_not_annualized() {
        let series = NavSeries::new(vec![NavRecord::new(date(2020, 1, 1), dec!(10))]);
        let plan = LumpsumPlan::new(dec!(1000), date(2020, 1, 1), date(2020, 1, 1)).unwrap();
        let result = plan.evaluate(&series).unwrap();

        assert_eq!(result.absolute_return, dec!(0));
        assert_eq!(result.annualized_return, None);
    }
}
