//! Axum server setup
//!
//! Server skeleton with:
//! - Pool, schema and seed account prepared before binding
//! - Bearer token gate on everything except login
//! - Single-origin or permissive CORS
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use schoolctl_core::{CoreError, SchoolConfig};

use super::routes;
use crate::auth::{self, AuthError, TokenKeys};
use crate::db::{create_pool_with_options, migrations};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenKeys) -> Self {
        Self { pool, tokens }
    }
}

/// Open the database, apply the schema and make sure an account exists.
pub async fn prepare_state(config: &SchoolConfig) -> Result<Arc<AppState>, ServerError> {
    if let Some(parent) = config.database.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let pool = create_pool_with_options(&config.database.path, config.database.max_connections).await?;
    migrations::run(&pool).await?;
    auth::ensure_admin(&pool, &config.auth).await?;

    if config.auth.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set, signing tokens with the development secret");
    }

    let tokens = TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl_days);
    Ok(Arc::new(AppState::new(pool, tokens)))
}

/// CORS for one configured origin, or any origin when unset.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ServerError> {
    match origin {
        Some(origin) => {
            let value = HeaderValue::from_str(origin)
                .map_err(|_| ServerError::InvalidOrigin(origin.to_string()))?;
            tracing::info!(origin, "CORS restricted to configured origin");
            Ok(CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => {
            tracing::warn!("CORS: CORS_ORIGIN not set - all origins allowed");
            Ok(CorsLayer::permissive())
        }
    }
}

/// Assemble all routes. Everything except `POST /auth/login` sits behind the token gate.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    let protected = Router::new()
        .merge(routes::auth::protected_router())
        .merge(routes::students::router())
        .merge(routes::teachers::router())
        .merge(routes::courses::router())
        .merge(routes::grades::router())
        .merge(routes::attendance::router())
        .merge(routes::summary::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        .merge(routes::auth::public_router())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(config: &SchoolConfig) -> Result<(), ServerError> {
    let bind_addr = config.server.bind_addr()?;
    let state = prepare_state(config).await?;
    let pool = state.pool.clone();

    let app = build_router(state, cors_layer(config.server.cors_origin.as_deref())?);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(
        db = %config.database.path.display(),
        "Server listening on {}",
        bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("seeding admin account failed: {0}")]
    Seed(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}
