//! # WorkDoc360 API
//!
//! HTTP API for the WorkDoc360 multi-tenant platform.
//!
//! This crate provides:
//! - Tenant resolution middleware attaching a [`TenantContext`] to every request
//! - The `require_tenant` guard for tenant-only routes
//! - Onboarding and branding endpoints
//! - CORS, timeout and request tracing layers
//!
//! # Architecture
//!
//! The API layer is built on Axum and provides:
//! - `/api/health` - Health check
//! - `/api/site` - Site descriptor for the requesting host
//! - `/api/companies` - Company onboarding
//! - `/api/companies/{slug}/availability` - Slug availability
//! - `/api/tenant` - Current tenant (tenant hosts only)
//! - `/api/tenant/branding` - Branding updates (tenant hosts only)
//!
//! # Tenant resolution
//!
//! Every request passes through [`TenantResolutionLayer`], which reads the
//! effective host (forwarded-host header, then `Host`, then the URI
//! authority), classifies it and looks up the tenant. Resolution never
//! rejects a request on its own; only routes behind `require_tenant` answer
//! `404` when the host is not a known tenant portal.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ApiConfig;
pub use error::ApiError;
pub use middleware::{CurrentTenant, TenantContext, TenantResolutionLayer};
pub use server::ApiServer;
pub use state::AppState;
