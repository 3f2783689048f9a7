//! Health check handler.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Component statuses
    pub components: ComponentStatus,
}

/// Component status.
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    /// API server status
    pub api: &'static str,
    /// Tenant directory status
    pub directory: &'static str,
    /// Number of tenants, when the directory answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenants: Option<usize>,
}

/// Health check handler.
///
/// GET /api/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (directory, tenants) = match state.directory().list().await {
        Ok(tenants) => ("healthy", Some(tenants.len())),
        Err(e) => {
            warn!(error = %e, "Tenant directory health check failed");
            ("unavailable", None)
        }
    };

    let response = HealthResponse {
        status: if tenants.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        components: ComponentStatus {
            api: "healthy",
            directory,
            tenants,
        },
    };

    Json(response)
}
