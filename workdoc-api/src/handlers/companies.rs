//! Company onboarding handlers.
//!
//! This module provides API handlers for:
//! - Registering a new company (tenant)
//! - Checking whether a company name yields a free portal address

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;
use workdoc_telemetry::spans::directory_write_span;
use workdoc_tenancy::{
    NewTenant, PostalAddress, TenantBranding, TradeType, is_canonical_slug, slugify,
};

use crate::error::{ApiError, ApiResult};
use crate::handlers::tenant::TenantDetail;
use crate::response::{ApiResponse, CreatedResponse};
use crate::state::AppState;

/// Create company request.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    /// Company name
    pub name: String,
    /// Requested slug; derived from the name when absent
    pub slug: Option<String>,
    /// Trade
    #[serde(default)]
    pub trade_type: TradeType,
    /// Postal address
    pub address: Option<PostalAddress>,
    /// Initial branding
    #[serde(default)]
    pub branding: TenantBranding,
}

/// Why a slug cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailability {
    /// Nothing usable was left after slugging.
    Empty,
    /// The slug is a reserved subdomain.
    Reserved,
    /// The portal host would never resolve to a company, e.g. because it
    /// looks like a local development host.
    Unreachable,
    /// Another company owns the slug.
    Taken,
}

/// Slug availability response.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    /// The slug derived from the request
    pub slug: String,
    /// Whether onboarding could use the slug
    pub available: bool,
    /// Why the slug is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Unavailability>,
    /// Portal URL the slug would get
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_url: Option<String>,
}

/// Register a new company.
///
/// POST /api/companies
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCompanyRequest>,
) -> ApiResult<CreatedResponse<TenantDetail>> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Company name is required".to_string()));
    }

    let slug = request
        .slug
        .unwrap_or_else(|| slugify(&request.name, state.tenancy.slug_max_length));

    let classifier = state.resolver().classifier();
    if classifier.is_reserved(&slug) {
        return Err(ApiError::BadRequest(format!(
            "'{slug}' is reserved and cannot be used as a company address"
        )));
    }
    // Malformed slugs are reported by the directory.
    if is_canonical_slug(&slug, state.tenancy.slug_max_length)
        && !classifier.is_routable_slug(&slug)
    {
        return Err(ApiError::BadRequest(format!(
            "'{slug}' cannot be served as a company address"
        )));
    }

    let mut input = NewTenant::new(request.name, request.trade_type)
        .with_slug(slug.clone())
        .with_branding(request.branding);
    input.address = request.address;

    let tenant = state
        .directory()
        .create(input)
        .instrument(directory_write_span("create", &slug))
        .await?;

    Ok(CreatedResponse::with_message(
        TenantDetail::new(&tenant, state.root_domain()),
        "Company created successfully",
    ))
}

/// Check whether a name or slug is free for onboarding.
///
/// GET /api/companies/{slug}/availability
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Path(requested): Path<String>,
) -> ApiResult<ApiResponse<AvailabilityResponse>> {
    let slug = slugify(&requested, state.tenancy.slug_max_length);

    let reason = if slug.is_empty() {
        Some(Unavailability::Empty)
    } else if state.resolver().classifier().is_reserved(&slug) {
        Some(Unavailability::Reserved)
    } else if !state.resolver().classifier().is_routable_slug(&slug) {
        Some(Unavailability::Unreachable)
    } else if state.directory().find_by_slug(&slug).await?.is_some() {
        Some(Unavailability::Taken)
    } else {
        None
    };

    let portal_url =
        (!slug.is_empty()).then(|| format!("https://{slug}.{}", state.root_domain()));

    Ok(ApiResponse::success(AvailabilityResponse {
        available: reason.is_none(),
        slug,
        reason,
        portal_url,
    }))
}
