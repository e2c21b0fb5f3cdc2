//! HTTP API Layer
//!
//! This crate provides the REST API of the mutual fund returns service using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Scheme pass-through, period returns, SIP and lumpsum
//! - **Middleware**: Request logging, request ids, tracing, CORS
//! - **DTOs**: Calculator request bodies and the health payload
//! - **Error Handling**: Consistent JSON error responses
//!
//! Handlers reach the upstream NAV source only through the
//! [`SchemeSource`] port held in [`AppState`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(source, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::PortError;
use domain_fund::SchemeSource;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{calculators, health, scheme};
use crate::middleware::request_logging;

/// Handler state: the scheme source and the loaded configuration
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SchemeSource>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn SchemeSource>, config: ApiConfig) -> Self {
        Self { source, config }
    }

    /// Error mapper for upstream calls made while serving `context`
    pub(crate) fn port_error(&self, context: &'static str) -> impl FnOnce(PortError) -> ApiError {
        let expose = self.config.expose_error_details;
        move |error| ApiError::from_port(error, context, expose)
    }
}

/// Builds the router: health probes at the root, scheme and calculator
/// routes under `/api`
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let scheme_routes = Router::new()
        .route("/mf", get(scheme::list_schemes))
        .route("/scheme/:code", get(scheme::get_scheme))
        .route("/scheme/:code/returns", get(calculators::scheme_returns))
        .route("/scheme/:code/sip", post(calculators::simulate_sip))
        .route("/scheme/:code/lumpsum", post(calculators::calculate_lumpsum));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(health_routes)
        .nest("/api", scheme_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
        .with_state(state)
}
