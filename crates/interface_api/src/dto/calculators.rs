//! Calculator DTOs
//!
//! Request bodies arrive with every field optional so that a missing field
//! yields the API's own 400 message rather than a deserialization error.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::temporal::parse_calendar_date;
use core_kernel::DateRange;
use domain_fund::{LumpsumPlan, LumpsumValuation, SipFrequency, SipPlan};

use crate::error::ApiError;

const SIP_REQUIRED: &str = "Missing required fields: amount, frequency, from, to";
const LUMPSUM_REQUIRED: &str = "Missing required fields: amount, from, to";
const RETURNS_REQUIRED: &str = "Either period or from/to dates required";
const INVALID_AMOUNT: &str = "Amount must be a positive number";
const AMOUNT_OUT_OF_RANGE: &str = "Amount is out of range";

/// Treats empty strings as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn to_amount(amount: f64) -> Result<Decimal, ApiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::BadRequest(INVALID_AMOUNT.to_string()));
    }
    // Positive but beyond what a Decimal holds, or too small to survive conversion
    Decimal::from_f64(amount)
        .filter(|amount| *amount > Decimal::ZERO)
        .ok_or_else(|| ApiError::BadRequest(AMOUNT_OUT_OF_RANGE.to_string()))
}

fn to_date(value: &str) -> Result<NaiveDate, ApiError> {
    Ok(parse_calendar_date(value)?)
}

/// Query string of the returns endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ReturnsQuery {
    pub period: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// What the returns endpoint was asked to compute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnsSelection {
    /// A named lookback period, possibly unknown
    Period(String),
    /// A custom date range
    Range(DateRange),
}

impl ReturnsQuery {
    /// Resolves the query; a period takes precedence over a date range
    pub fn selection(&self) -> Result<ReturnsSelection, ApiError> {
        if let Some(period) = present(&self.period) {
            return Ok(ReturnsSelection::Period(period.to_string()));
        }
        match (present(&self.from), present(&self.to)) {
            (Some(from), Some(to)) => Ok(ReturnsSelection::Range(DateRange::parse(from, to)?)),
            _ => Err(ApiError::BadRequest(RETURNS_REQUIRED.to_string())),
        }
    }
}

/// Body of the SIP endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SipRequest {
    #[validate(range(exclusive_min = 0.0, message = "Amount must be a positive number"))]
    pub amount: Option<f64>,
    pub frequency: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SipRequest {
    /// Validates the body and builds the plan
    pub fn into_plan(self) -> Result<SipPlan, ApiError> {
        let (Some(amount), Some(frequency), Some(from), Some(to)) = (
            self.amount,
            present(&self.frequency),
            present(&self.from),
            present(&self.to),
        ) else {
            return Err(ApiError::BadRequest(SIP_REQUIRED.to_string()));
        };
        self.validate()?;

        let frequency: SipFrequency = frequency.parse()?;
        Ok(SipPlan::new(to_amount(amount)?, frequency, to_date(from)?, to_date(to)?)?)
    }
}

/// Body of the lumpsum endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LumpsumRequest {
    #[validate(range(exclusive_min = 0.0, message = "Amount must be a positive number"))]
    pub amount: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// `latest` (default) or `as_of_end`
    pub valuation: Option<String>,
}

impl LumpsumRequest {
    /// Validates the body and builds the plan
    pub fn into_plan(self) -> Result<LumpsumPlan, ApiError> {
        let (Some(amount), Some(from), Some(to)) =
            (self.amount, present(&self.from), present(&self.to))
        else {
            return Err(ApiError::BadRequest(LUMPSUM_REQUIRED.to_string()));
        };
        self.validate()?;

        let valuation = match present(&self.valuation) {
            Some(valuation) => valuation.parse()?,
            None => LumpsumValuation::default(),
        };
        Ok(LumpsumPlan::new(to_amount(amount)?, to_date(from)?, to_date(to)?)?.with_valuation(valuation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sip(amount: Option<f64>, frequency: &str, from: &str, to: &str) -> SipRequest {
        SipRequest {
            amount,
            frequency: Some(frequency.to_string()),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }

    fn bad_request_message(result: Result<impl std::fmt::Debug, ApiError>) -> String {
        match result {
            Err(ApiError::BadRequest(message)) => message,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_sip_request() {
        let plan = sip(Some(5000.0), "monthly", "2020-01-01", "2020-03-01").into_plan().unwrap();

        assert_eq!(plan.amount, Decimal::from(5000));
        assert_eq!(plan.frequency, SipFrequency::Monthly);
        assert_eq!(plan.from, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_sip_missing_fields() {
        let message = bad_request_message(SipRequest::default().into_plan());
        assert_eq!(message, SIP_REQUIRED);

        let message = bad_request_message(sip(Some(5000.0), "", "2020-01-01", "2020-03-01").into_plan());
        assert_eq!(message, SIP_REQUIRED);
    }

    #[test]
    fn test_sip_non_positive_amount() {
        let message = bad_request_message(sip(Some(0.0), "monthly", "2020-01-01", "2020-03-01").into_plan());
        assert_eq!(message, INVALID_AMOUNT);

        let message = bad_request_message(sip(Some(-10.0), "monthly", "2020-01-01", "2020-03-01").into_plan());
        assert_eq!(message, INVALID_AMOUNT);
    }

    #[test]
    fn test_amount_too_large_for_decimal() {
        let message = bad_request_message(sip(Some(1e30), "monthly", "2020-01-01", "2020-03-01").into_plan());
        assert_eq!(message, AMOUNT_OUT_OF_RANGE);

        let request = LumpsumRequest {
            amount: Some(1e30),
            from: Some("2020-01-01".to_string()),
            to: Some("2021-01-01".to_string()),
            valuation: None,
        };
        assert_eq!(bad_request_message(request.into_plan()), AMOUNT_OUT_OF_RANGE);
    }

    #[test]
    fn test_sip_unknown_frequency() {
        let message = bad_request_message(sip(Some(5000.0), "weekly", "2020-01-01", "2020-03-01").into_plan());
        assert!(message.contains("monthly or quarterly"));
    }

    #[test]
    fn test_sip_bad_date() {
        let message = bad_request_message(sip(Some(5000.0), "monthly", "2020-13-45", "2020-03-01").into_plan());
        assert!(message.contains("Invalid date"));
    }

    #[test]
    fn test_lumpsum_valuation() {
        let request = LumpsumRequest {
            amount: Some(1000.0),
            from: Some("2020-01-01".to_string()),
            to: Some("2021-01-01".to_string()),
            valuation: Some("as_of_end".to_string()),
        };
        assert_eq!(request.into_plan().unwrap().valuation, LumpsumValuation::AsOfEnd);

        let request = LumpsumRequest {
            amount: Some(1000.0),
            from: Some("01-01-2020".to_string()),
            to: Some("01-01-2021".to_string()),
            valuation: None,
        };
        assert_eq!(request.into_plan().unwrap().valuation, LumpsumValuation::Latest);
    }

    #[test]
    fn test_returns_selection() {
        let query = ReturnsQuery {
            period: Some("1y".to_string()),
            from: Some("2020-01-01".to_string()),
            to: None,
        };
        assert_eq!(query.selection().unwrap(), ReturnsSelection::Period("1y".to_string()));

        let query = ReturnsQuery {
            period: None,
            from: Some("2020-01-01".to_string()),
            to: Some("2020-06-30".to_string()),
        };
        assert!(matches!(query.selection().unwrap(), ReturnsSelection::Range(_)));

        let message = bad_request_message(ReturnsQuery::default().selection());
        assert_eq!(message, RETURNS_REQUIRED);
    }

    #[test]
    fn test_returns_inverted_range_is_rejected() {
        let query = ReturnsQuery {
            period: None,
            from: Some("2021-01-01".to_string()),
            to: Some("2020-01-01".to_string()),
        };
        assert!(query.selection().is_err());
    }
}
