//! Site descriptor handler.

use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;

use crate::handlers::tenant::TenantDetail;
use crate::middleware::TenantContext;
use crate::response::ApiResponse;
use crate::state::AppState;

/// What the frontend should render for the requesting host.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    /// The marketing site.
    Main,
    /// A tenant portal.
    Tenant,
    /// A subdomain with no tenant behind it.
    UnknownTenant,
}

/// Site descriptor response.
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    /// What to render
    pub kind: SiteKind,
    /// Root domain the site is served under
    pub root_domain: String,
    /// Leading host label, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// The tenant, for tenant portals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<TenantDetail>,
}

/// Describe the site for the requesting host.
///
/// GET /api/site
pub async fn site(
    State(state): State<Arc<AppState>>,
    context: TenantContext,
) -> ApiResponse<SiteResponse> {
    let root_domain = state.root_domain();

    let kind = match (&context.tenant, &context.subdomain) {
        (Some(_), _) => SiteKind::Tenant,
        (None, Some(label)) if !state.resolver().classifier().is_reserved(label) => {
            SiteKind::UnknownTenant
        }
        _ => SiteKind::Main,
    };

    ApiResponse::success(SiteResponse {
        kind,
        root_domain: root_domain.to_string(),
        company: context
            .tenant
            .as_deref()
            .map(|tenant| TenantDetail::new(tenant, root_domain)),
        subdomain: context.subdomain,
    })
}
