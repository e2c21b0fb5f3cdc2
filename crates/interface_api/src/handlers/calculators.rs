//! Return calculator handlers

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use tracing::debug;

use core_kernel::SchemeCode;
use domain_fund::{LumpsumResult, NavSeries, PeriodReturn, SipResult};

use super::parse_code;
use crate::dto::calculators::{LumpsumRequest, ReturnsQuery, ReturnsSelection, SipRequest};
use crate::{error::ApiError, AppState};

async fn fetch_series(
    state: &AppState,
    code: &SchemeCode,
    context: &'static str,
) -> Result<NavSeries, ApiError> {
    let details = state
        .source
        .scheme_details(code)
        .await
        .map_err(state.port_error(context))?;
    Ok(details.nav_series())
}

/// Point-to-point return over a named period or a custom date range
///
/// An unknown period name yields `null`, as does a series with no usable NAV.
pub async fn scheme_returns(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<ReturnsQuery>, QueryRejection>,
) -> Result<Json<Option<PeriodReturn>>, ApiError> {
    let code = parse_code(&code)?;
    let Query(query) = query?;
    let selection = query.selection()?;

    let series = fetch_series(&state, &code, "Failed to calculate returns").await?;

    let result = match selection {
        ReturnsSelection::Period(period) => {
            let as_of = Local::now().date_naive();
            PeriodReturn::calculate_named(&series, &period, as_of)
        }
        ReturnsSelection::Range(range) => PeriodReturn::between(&series, range.start, range.end),
    };

    if result.is_none() {
        debug!(scheme_code = %code, "No period return for request");
    }
    Ok(Json(result))
}

/// Simulates a recurring investment plan
pub async fn simulate_sip(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<SipRequest>, JsonRejection>,
) -> Result<Json<SipResult>, ApiError> {
    let code = parse_code(&code)?;
    let Json(request) = payload?;
    let plan = request.into_plan()?;

    let series = fetch_series(&state, &code, "Failed to calculate SIP").await?;

    plan.simulate(&series)
        .map(Json)
        .ok_or_else(|| ApiError::BadRequest("Unable to calculate SIP - insufficient data".to_string()))
}

/// Values a one-time investment
pub async fn calculate_lumpsum(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<LumpsumRequest>, JsonRejection>,
) -> Result<Json<LumpsumResult>, ApiError> {
    let code = parse_code(&code)?;
    let Json(request) = payload?;
    let plan = request.into_plan()?;

    let series = fetch_series(&state, &code, "Failed to calculate lumpsum").await?;

    plan.evaluate(&series).map(Json).ok_or_else(|| {
        ApiError::BadRequest("Unable to calculate lumpsum - insufficient data".to_string())
    })
}
