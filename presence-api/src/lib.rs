//! # Presence API Server
//!
//! HTTP transport for the presence registry.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness check
//! - `POST /api/register-job` - Register a receiver for a job
//! - `POST /api/update-receiver` - Heartbeat from a receiver
//! - `GET /api/check-receivers?usernames=a,b` - List present receivers
//! - `DELETE /api/job/:jobId` - Unregister a job
//! - `GET /api/stats` - Registry size and server time
//!
//! ## Example
//!
//! ```rust,ignore
//! use presence_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let server = ApiServer::new(config);
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use presence_registry::spawn_sweeper;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// API server for the presence registry.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Returns the shared state.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until Ctrl-C.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received");
                    signal.cancel();
                }
                Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
            }
        });

        self.run_until(addr, shutdown).await
    }

    /// Runs the server on the given address until `shutdown` is cancelled.
    ///
    /// The sweeper runs for the lifetime of the server and is joined before
    /// returning.
    pub async fn run_until(
        self,
        addr: impl Into<SocketAddr>,
        shutdown: CancellationToken,
    ) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let registry = &self.state.config.registry;
        info!(
            %addr,
            timeout_secs = registry.timeout.as_secs(),
            sweep_interval_secs = registry.sweep_interval.as_secs(),
            "Presence server listening"
        );

        let sweeper = spawn_sweeper(self.state.registry.clone(), shutdown.clone());

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .await;

        shutdown.cancel();
        if let Err(e) = sweeper.await {
            warn!(error = %e, "Sweeper task failed");
        }

        result
    }
}
