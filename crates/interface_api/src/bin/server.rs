//! Mutual Fund Returns - API Server Binary
//!
//! This binary starts the HTTP API server in front of the mfapi.in NAV source.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin mfapi-server
//! API_PORT=9000 API_CACHE_TTL_SECS=3600 API_LOG_FORMAT=json cargo run --bin mfapi-server
//! ```
//!
//! # Settings
//!
//! Read from `API_*` variables, optionally via a `.env` file:
//!
//! * `API_HOST` / `API_PORT` - Listen address (default: 0.0.0.0:8080)
//! * `API_LOG_LEVEL` - Filter directive when `RUST_LOG` is unset (default: info)
//! * `API_LOG_FORMAT` - `text` or `json` (default: text)
//! * `API_UPSTREAM_BASE_URL` - Scheme directory URL (default: https://api.mfapi.in/mf)
//! * `API_UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
//! * `API_CACHE_TTL_SECS` - Lifetime of cached upstream responses (default: 86400)
//! * `API_CACHE_CHECK_PERIOD_SECS` - Period of expired-entry sweeps (default: 3600)
//! * `API_EXPOSE_ERROR_DETAILS` - Include error text in 500 responses (default: false)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_mfapi::{spawn_expiry_sweeper, CachedPayload, CachedSchemeSource, MemoryTtlCache, MfApiClient};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::{create_router, AppState};

/// Fails if the configuration is unusable, the upstream client cannot be
/// built or the listen address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    config.validate()?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        upstream = %config.upstream_base_url,
        "Starting mutual fund returns API server"
    );

    let client = MfApiClient::new(config.upstream()).context("Failed to build upstream client")?;
    let cache = Arc::new(MemoryTtlCache::<CachedPayload>::new(config.cache_ttl()));
    let sweeper = spawn_expiry_sweeper(cache.clone(), config.cache_check_period());
    let source = CachedSchemeSource::new(client, cache);

    let app = create_router(AppState::new(Arc::new(source), config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Stopped");
    Ok(())
}

/// Installs the global subscriber; `RUST_LOG` wins over `log_level`
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Resolves on Ctrl+C or SIGTERM; in-flight requests are allowed to finish
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!(signal = "SIGINT", "Draining connections");
        }
        _ = terminate => {
            tracing::info!(signal = "SIGTERM", "Draining connections");
        }
    }
}
