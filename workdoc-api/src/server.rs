//! API server implementation.
//!
//! This module provides the main API server that handles HTTP requests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use workdoc_telemetry::spans::request_span;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::routes::create_router;
use crate::state::AppState;

/// API server.
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Application state
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server over the given state.
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            config: state.config.clone(),
            state,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Builds the router with the HTTP middleware stack.
    #[must_use]
    pub fn app(&self) -> Router {
        let app = create_router(Arc::clone(&self.state))
            .layer(timeout_layer(&self.config));

        if self.config.enable_request_logging {
            app.layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let host = request
                    .headers()
                    .get(axum::http::header::HOST)
                    .and_then(|value| value.to_str().ok());
                request_span(request.method().as_str(), request.uri().path(), host)
            }))
        } else {
            app
        }
    }

    /// Runs the API server with graceful shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or run.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ApiError> {
        let addr = self.config.bind_address();
        let app = self.app();

        // Parse address
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| ApiError::Internal(format!("Invalid bind address: {e}")))?;

        // Create listener
        let listener = TcpListener::bind(socket_addr)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to bind to {addr}: {e}")))?;

        info!(
            root_domain = %self.state.root_domain(),
            "API server listening on {}", addr
        );

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::Internal(format!("Server error: {e}")))?;

        warn!("API server shutting down");

        Ok(())
    }
}

/// Answers `408 Request Timeout` once a request exceeds the configured limit.
fn timeout_layer(config: &ApiConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout())
}
