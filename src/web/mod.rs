//! Web layer module
//!
//! Thin axum handlers over [`MealService`]. Handlers validate nothing
//! themselves beyond extracting the JSON body; the service owns validation
//! and [`responses`] owns the mapping from errors to status codes.
//!
//! Routes:
//! - `GET /ping` reports the active storage backend
//! - `GET /ready` round trips to storage
//! - `POST /meals` upserts one day
//! - `GET /meals/:date` returns one day

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{AllowedOrigins, Config, WebConfig};
use crate::errors::{AppError, AppResult};
use crate::services::MealService;

pub mod handlers;
pub mod middleware;
pub mod responses;

pub use responses::{handle_error, ErrorResponse};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub meals: MealService,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, meals: MealService) -> Result<Self> {
        let cors = cors_layer(&config.web)?;
        let app = create_router(AppState { meals }, cors);

        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .with_context(|| {
                format!("Invalid listen address {}:{}", config.web.host, config.web.port)
            })?;

        Ok(Self { app, addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the web server and run until SIGINT/SIGTERM
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind web server to {}", self.addr))?;
        info!("Web server listening on http://{}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/meals", post(handlers::meals::save_meals))
        .route("/meals/:date", get(handlers::meals::get_meals))
        // Middleware (applied in reverse order)
        .layer(from_fn(middleware::request_logging_middleware))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer for the configured origins
pub fn cors_layer(config: &WebConfig) -> AppResult<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match config.origins() {
        AllowedOrigins::Any => Ok(layer.allow_origin(Any)),
        AllowedOrigins::List(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|_| {
                        AppError::configuration(format!("invalid allowed origin '{}'", origin))
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;
            Ok(layer.allow_origin(AllowOrigin::list(origins)))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
                    _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully"),
                }
                return;
            }
            _ => warn!("Failed to install unix signal handlers, falling back to Ctrl+C"),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
