//! Scheme data as published by the upstream NAV source
//!
//! These types mirror the upstream JSON so API responses can pass them
//! through unchanged.

use serde::{Deserialize, Serialize};

use core_kernel::SchemeCode;

use crate::nav::{NavPoint, NavSeries};

/// Entry in the scheme directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeSummary {
    pub scheme_code: SchemeCode,
    pub scheme_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin_growth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin_div_reinvestment: Option<String>,
}

/// Descriptive metadata for a scheme
///
/// Every field is optional: the upstream returns an empty object for codes
/// it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_house: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_code: Option<SchemeCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin_growth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin_div_reinvestment: Option<String>,
}

/// Scheme metadata plus its NAV history, most recent first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeDetails {
    #[serde(default)]
    pub meta: SchemeMeta,
    #[serde(default)]
    pub data: Vec<NavPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SchemeDetails {
    /// Parses the NAV history into a series
    pub fn nav_series(&self) -> NavSeries {
        NavSeries::from_points(&self.data)
    }

    /// Returns true if the upstream knows nothing about the scheme
    pub fn is_empty(&self) -> bool {
        self.meta.scheme_code.is_none() && self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserializes_upstream_details() {
        let json = r#"{
            "meta": {
                "fund_house": "Example Mutual Fund",
                "scheme_type": "Open Ended Schemes",
                "scheme_category": "Equity Scheme - Large Cap Fund",
                "scheme_code": 119551,
                "scheme_name": "Example Bluechip Fund - Direct Plan - Growth"
            },
            "data": [
                {"date": "02-01-2024", "nav": "45.12300"},
                {"date": "01-01-2024", "nav": "44.98700"}
            ],
            "status": "SUCCESS"
        }"#;

        let details: SchemeDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.meta.scheme_code, Some(SchemeCode::new(119551)));
        assert_eq!(details.data.len(), 2);

        let series = details.nav_series();
        assert_eq!(series.latest().map(|q| q.nav), Some(dec!(45.123)));
    }

    #[test]
    fn test_unknown_scheme_is_empty() {
        let details: SchemeDetails =
            serde_json::from_str(r#"{"meta": {}, "data": [], "status": "SUCCESS"}"#).unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn test_summary_uses_camel_case() {
        let json = r#"[{"schemeCode": 100027, "schemeName": "Example Income Fund"}]"#;
        let schemes: Vec<SchemeSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(schemes[0].scheme_code, SchemeCode::new(100027));

        let back = serde_json::to_value(&schemes[0]).unwrap();
        assert_eq!(back["schemeName"], "Example Income Fund");
    }
}
