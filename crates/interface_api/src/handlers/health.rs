//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::dto::health::HealthResponse;
use crate::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness check (includes the upstream NAV source)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let upstream = state.source.health_check().await;

    if upstream.is_operational() {
        (StatusCode::OK, Json(HealthResponse::new("ready").with_upstream(upstream)))
    } else {
        tracing::warn!(
            adapter = %upstream.adapter_id,
            message = upstream.message.as_deref().unwrap_or(""),
            "Upstream not ready"
        );
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("not_ready").with_upstream(upstream)),
        )
    }
}
