//! API route definitions.
//!
//! This module defines all API routes and their handlers.

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;
use crate::handlers::{companies, health, site, tenant};
use crate::middleware::{TenantResolutionLayer, require_tenant};
use crate::state::AppState;

/// Creates the API router with all routes.
///
/// Every route sits behind [`TenantResolutionLayer`]; tenant-only routes
/// are additionally guarded by [`require_tenant`].
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config.cors);

    // Routes served on every host
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/site", get(site::site))
        .route("/companies", post(companies::create_company))
        .route(
            "/companies/{slug}/availability",
            get(companies::check_availability),
        );

    // Routes served only on a tenant's portal host
    let tenant_routes = Router::new()
        .route("/tenant", get(tenant::get_tenant))
        .route("/tenant/branding", patch(tenant::update_branding))
        .route_layer(middleware::from_fn(require_tenant));

    Router::new()
        .nest("/api", public_routes.merge(tenant_routes))
        .layer(TenantResolutionLayer::new(state.clone()))
        .layer(cors)
        .with_state(state)
}

/// Builds the CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new().max_age(std::time::Duration::from_secs(config.max_age_secs));

    if config.allowed_origins.is_empty() {
        return cors.allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = cors.allow_origin(origins);

    // Credentials cannot be combined with wildcards
    if config.allow_credentials {
        cors.allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    } else {
        cors.allow_methods(Any).allow_headers(Any)
    }
}
