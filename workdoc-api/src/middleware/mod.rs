//! API middleware components.
//!
//! This module provides middleware for:
//! - Tenant resolution from the request host
//! - Guarding tenant-only routes

mod tenant;

pub use tenant::{
    CurrentTenant, TenantContext, TenantResolutionLayer, TenantResolutionService, effective_host,
    require_tenant,
};
