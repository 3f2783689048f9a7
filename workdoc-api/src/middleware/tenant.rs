//! Tenant resolution middleware.
//!
//! [`TenantResolutionLayer`] resolves the requesting host to a tenant and
//! stores a [`TenantContext`] in the request extensions. Handlers read it
//! with the [`TenantContext`] or [`CurrentTenant`] extractors; tenant-only
//! routes are wrapped in [`require_tenant`].

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{HeaderMap, Request, Uri, header::HOST, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use workdoc_tenancy::{Resolution, Tenant};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Tenant information attached to every request.
#[derive(Debug, Clone, Default)]
pub struct TenantContext {
    /// True iff the host resolved to a known tenant.
    pub is_tenant_request: bool,
    /// The resolved tenant.
    pub tenant: Option<Arc<Tenant>>,
    /// Leading host label for tenant, unknown-tenant and reserved hosts.
    pub subdomain: Option<String>,
}

impl TenantContext {
    /// Context for requests to the main site.
    #[must_use]
    pub fn main_site() -> Self {
        Self::default()
    }
}

impl From<Resolution> for TenantContext {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Main => Self::main_site(),
            Resolution::Reserved(label) => Self {
                is_tenant_request: false,
                tenant: None,
                subdomain: Some(label),
            },
            Resolution::Tenant { token, tenant } => Self {
                is_tenant_request: true,
                tenant: Some(tenant),
                subdomain: Some(token),
            },
            Resolution::TenantNotFound { token } => Self {
                is_tenant_request: false,
                tenant: None,
                subdomain: Some(token),
            },
        }
    }
}

/// Returns the host the client addressed.
///
/// Precedence: the forwarded-host header set by the proxy (first entry of
/// a comma-separated list), then `Host`, then the URI authority. Returns
/// `None` when none is present or readable.
#[must_use]
pub fn effective_host(headers: &HeaderMap, uri: &Uri, forwarded_header: &str) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header_value(forwarded_header)
        .or_else(|| header_value(HOST.as_str()))
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .map(ToString::to_string)
}

/// Layer resolving the request host to a tenant.
#[derive(Debug, Clone)]
pub struct TenantResolutionLayer {
    state: Arc<AppState>,
}

impl TenantResolutionLayer {
    /// Creates a new tenant resolution layer.
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for TenantResolutionLayer {
    type Service = TenantResolutionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TenantResolutionService {
            inner,
            state: Arc::clone(&self.state),
        }
    }
}

/// Service that attaches a [`TenantContext`] to each request.
#[derive(Debug, Clone)]
pub struct TenantResolutionService<S> {
    inner: S,
    state: Arc<AppState>,
}

impl<S> Service<Request<Body>> for TenantResolutionService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let host = effective_host(
            request.headers(),
            request.uri(),
            &self.state.tenancy.forwarded_host_header,
        );

        let state = Arc::clone(&self.state);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let resolution = state.resolver().resolve_host(host.as_deref()).await;
            request
                .extensions_mut()
                .insert(TenantContext::from(resolution));

            inner.call(request).await
        })
    }
}

/// Extractor for the tenant context. Requests that bypassed the
/// resolution layer get the main-site context.
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Guard for tenant-only routes.
///
/// Answers `404 NOT_FOUND` unless the request resolved to a tenant.
pub async fn require_tenant(request: Request<Body>, next: Next) -> ApiResult<Response> {
    let is_tenant_request = request
        .extensions()
        .get::<TenantContext>()
        .is_some_and(|context| context.is_tenant_request);

    if !is_tenant_request {
        return Err(ApiError::tenant_not_found());
    }

    Ok(next.run(request).await)
}

/// Extractor for the resolved tenant.
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub Arc<Tenant>);

impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .and_then(|context| context.tenant.clone())
            .map(CurrentTenant)
            .ok_or_else(ApiError::tenant_not_found)
    }
}
