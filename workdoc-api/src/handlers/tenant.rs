//! Current tenant handlers.
//!
//! These routes sit behind `require_tenant` and only answer on a tenant's
//! own portal host.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;
use workdoc_telemetry::spans::directory_write_span;
use workdoc_tenancy::{BrandingUpdate, PostalAddress, Tenant, TenantBranding, TradeType};

use crate::error::{ApiError, ApiResult};
use crate::middleware::CurrentTenant;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Tenant detail response.
#[derive(Debug, Serialize)]
pub struct TenantDetail {
    /// Tenant ID
    pub id: String,
    /// Company name
    pub name: String,
    /// Tenant slug
    pub slug: String,
    /// Trade
    pub trade_type: TradeType,
    /// Human-readable trade
    pub trade_label: String,
    /// Portal URL
    pub portal_url: String,
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    /// Portal branding
    pub branding: TenantBranding,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TenantDetail {
    /// Builds the detail view of a tenant served under `root_domain`.
    #[must_use]
    pub fn new(tenant: &Tenant, root_domain: &str) -> Self {
        Self {
            id: tenant.id().to_string(),
            name: tenant.name().to_string(),
            slug: tenant.slug().to_string(),
            trade_type: tenant.trade_type(),
            trade_label: tenant.trade_type().to_string(),
            portal_url: format!("https://{}", tenant.portal_host(root_domain)),
            address: tenant.address().cloned(),
            branding: tenant.branding().clone(),
            created_at: tenant.created_at(),
            updated_at: tenant.updated_at(),
        }
    }
}

/// Get the current tenant.
///
/// GET /api/tenant
pub async fn get_tenant(
    State(state): State<Arc<AppState>>,
    CurrentTenant(tenant): CurrentTenant,
) -> ApiResponse<TenantDetail> {
    ApiResponse::success(TenantDetail::new(&tenant, state.root_domain()))
}

/// Update the current tenant's branding.
///
/// PATCH /api/tenant/branding
pub async fn update_branding(
    State(state): State<Arc<AppState>>,
    CurrentTenant(tenant): CurrentTenant,
    Json(update): Json<BrandingUpdate>,
) -> ApiResult<ApiResponse<TenantDetail>> {
    if update.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let updated = state
        .directory()
        .update_branding(tenant.id(), update)
        .instrument(directory_write_span("update_branding", tenant.slug()))
        .await?;

    Ok(ApiResponse::success_with_message(
        TenantDetail::new(&updated, state.root_domain()),
        "Branding updated",
    ))
}
