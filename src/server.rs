// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! HTTP bootstrap
//!
//! Wires the validated configuration into the listener and binds the
//! configured port. Layers, outermost first: request tracing, protective
//! headers (so CORS preflights carry them too), CORS, body limit. Every route
//! sits under `/api` and is throttled, except the `/health` liveness check.

use anyhow::{Context, Result};
use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{ConfigRegistry, Environment, RateLimitConfig, ServerConfig};
use crate::security::{cors_layer, security_headers};
use crate::throttle::{throttle, Throttle};

pub const GLOBAL_PREFIX: &str = "/api";
pub const HEALTH_PATH: &str = "/health";

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

const THROTTLE_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    build_time: &'static str,
    git_hash: &'static str,
    environment: Environment,
    timestamp: chrono::DateTime<chrono::Utc>,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
        environment: state.environment,
        timestamp: chrono::Utc::now(),
    })
}

async fn api_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
    }))
}

/// Routes served under [`GLOBAL_PREFIX`].
fn api_routes() -> Router<AppState> {
    Router::new().route("/", get(api_root))
}

/// Assembles the application router from the configuration registry.
pub fn build_router(config: Arc<ConfigRegistry>) -> Result<Router> {
    build_router_with_throttle(config).map(|(router, _)| router)
}

fn build_router_with_throttle(config: Arc<ConfigRegistry>) -> Result<(Router, Throttle)> {
    let server = config
        .namespace::<ServerConfig>()
        .context("server settings missing from configuration registry")?
        .clone();
    let rate_limit = config
        .namespace::<RateLimitConfig>()
        .context("rate limit settings missing from configuration registry")?;
    let throttle_state = Throttle::new(rate_limit);

    let state = AppState {
        environment: server.environment,
    };

    let api = api_routes().layer(middleware::from_fn_with_state(
        throttle_state.clone(),
        throttle,
    ));

    let router = Router::new()
        .route(HEALTH_PATH, get(health_check))
        .nest(GLOBAL_PREFIX, api)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer(&server.cors_origins))
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok((router, throttle_state))
}

/// Binds the configured port and serves until Ctrl-C or SIGTERM.
///
/// A bind failure is returned as is; there is no retry.
pub async fn serve(config: ConfigRegistry) -> Result<()> {
    let config = Arc::new(config);
    let server = config
        .namespace::<ServerConfig>()
        .context("server settings missing from configuration registry")?
        .clone();
    let (app, throttle_state) = build_router_with_throttle(config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Application running on http://localhost:{}", server.port);
    info!("Environment: {}", server.environment);

    let cleanup = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(THROTTLE_CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            throttle_state.retain_recent();
        }
    });

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error");

    cleanup.abort();
    result
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
