//! Application state for the API server.

use std::sync::Arc;
use std::time::Instant;
use workdoc_tenancy::{HostClassifier, TenancyConfig, TenantDirectory, TenantResolver};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// API configuration
    pub config: ApiConfig,
    /// Tenancy configuration
    pub tenancy: TenancyConfig,
    /// Hostname to tenant resolver
    resolver: TenantResolver,
    /// Server start time
    started_at: Instant,
}

impl AppState {
    /// Creates application state over the given directory.
    ///
    /// The resolver is built from the tenancy configuration and records its
    /// events under `span`.
    #[must_use]
    pub fn new(
        config: ApiConfig,
        tenancy: TenancyConfig,
        directory: Arc<dyn TenantDirectory>,
        span: tracing::Span,
    ) -> Self {
        let resolver = TenantResolver::new(HostClassifier::new(&tenancy), directory).with_span(span);
        Self {
            config,
            tenancy,
            resolver,
            started_at: Instant::now(),
        }
    }

    /// Returns the tenant resolver.
    #[must_use]
    pub fn resolver(&self) -> &TenantResolver {
        &self.resolver
    }

    /// Returns the tenant directory.
    #[must_use]
    pub fn directory(&self) -> &Arc<dyn TenantDirectory> {
        self.resolver.directory()
    }

    /// Returns the root domain tenants are served under.
    #[must_use]
    pub fn root_domain(&self) -> &str {
        self.resolver.classifier().root_domain()
    }

    /// Returns the seconds elapsed since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workdoc_tenancy::InMemoryTenantDirectory;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new(
            ApiConfig::default(),
            TenancyConfig::for_root_domain("WorkDoc360.co.uk"),
            Arc::new(InMemoryTenantDirectory::default()),
            tracing::Span::none(),
        );

        assert_eq!(state.root_domain(), "workdoc360.co.uk");
        assert!(state.uptime_secs() < 5);
    }
}
