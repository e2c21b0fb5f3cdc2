//! Scheme pass-through handlers

use axum::{
    extract::{Path, State},
    Json,
};

use domain_fund::{SchemeDetails, SchemeSummary};

use super::parse_code;
use crate::{error::ApiError, AppState};

/// Lists every scheme known to the upstream source
pub async fn list_schemes(
    State(state): State<AppState>,
) -> Result<Json<Vec<SchemeSummary>>, ApiError> {
    let schemes = state
        .source
        .list_schemes()
        .await
        .map_err(state.port_error("Failed to fetch schemes"))?;

    Ok(Json(schemes))
}

/// Returns a scheme's metadata and NAV history as published upstream
pub async fn get_scheme(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SchemeDetails>, ApiError> {
    let code = parse_code(&code)?;
    let details = state
        .source
        .scheme_details(&code)
        .await
        .map_err(state.port_error("Failed to fetch scheme details"))?;

    Ok(Json(details))
}
