//! Hostname to tenant resolution.

use std::sync::Arc;
use tracing::{Span, debug, warn};

use crate::classifier::{HostClass, HostClassifier};
use crate::directory::TenantDirectory;
use crate::tenant::Tenant;

/// Outcome of resolving a request host.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The host serves the main site.
    Main,
    /// The host's leading label is reserved; no lookup was made.
    Reserved(String),
    /// The host belongs to a known tenant.
    Tenant {
        /// Leading label of the host.
        token: String,
        /// The resolved tenant.
        tenant: Arc<Tenant>,
    },
    /// The host looked like a tenant portal but no tenant was found, or the
    /// directory could not be consulted.
    TenantNotFound {
        /// Leading label of the host.
        token: String,
    },
}

impl Resolution {
    /// Returns true if the host resolved to a tenant.
    #[must_use]
    pub fn is_tenant(&self) -> bool {
        matches!(self, Self::Tenant { .. })
    }

    /// Returns the resolved tenant, if any.
    #[must_use]
    pub fn tenant(&self) -> Option<&Arc<Tenant>> {
        match self {
            Self::Tenant { tenant, .. } => Some(tenant),
            _ => None,
        }
    }

    /// Returns the leading label of a non-main host.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Main => None,
            Self::Reserved(token) | Self::Tenant { token, .. } | Self::TenantNotFound { token } => {
                Some(token)
            }
        }
    }
}

/// Resolves request hosts to tenants.
///
/// The resolver never fails: directory faults are logged under its span
/// and reported as [`Resolution::TenantNotFound`], so a broken directory
/// degrades tenant portals to the main site rather than taking every
/// request down with it.
#[derive(Clone)]
pub struct TenantResolver {
    classifier: HostClassifier,
    directory: Arc<dyn TenantDirectory>,
    span: Span,
}

impl std::fmt::Debug for TenantResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantResolver")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl TenantResolver {
    /// Creates a resolver over the given directory.
    #[must_use]
    pub fn new(classifier: HostClassifier, directory: Arc<dyn TenantDirectory>) -> Self {
        Self {
            classifier,
            directory,
            span: Span::none(),
        }
    }

    /// Sets the span resolver events are recorded under.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the hostname classifier.
    #[must_use]
    pub fn classifier(&self) -> &HostClassifier {
        &self.classifier
    }

    /// Returns the underlying directory.
    #[must_use]
    pub fn directory(&self) -> &Arc<dyn TenantDirectory> {
        &self.directory
    }

    /// Looks up the tenant owning `token` with a single directory query.
    ///
    /// Returns `None` when no tenant matches or when the directory fails;
    /// failures are logged with the token and the error.
    pub async fn resolve(&self, token: &str) -> Option<Arc<Tenant>> {
        match self.directory.find_by_slug(token).await {
            Ok(tenant) => tenant,
            Err(error) => {
                self.span.in_scope(|| {
                    warn!(token = %token, error = %error, "Tenant lookup failed");
                });
                None
            }
        }
    }

    /// Classifies `host` and, for tenant candidates, looks the tenant up.
    ///
    /// A missing host resolves to [`Resolution::Main`]. Reserved and main
    /// hosts never touch the directory.
    pub async fn resolve_host(&self, host: Option<&str>) -> Resolution {
        let class = host.map_or(HostClass::Main, |host| self.classifier.classify(host));

        let resolution = match class {
            HostClass::Main => Resolution::Main,
            HostClass::Reserved(label) => Resolution::Reserved(label),
            HostClass::Candidate(token) => match self.resolve(&token).await {
                Some(tenant) => Resolution::Tenant { token, tenant },
                None => Resolution::TenantNotFound { token },
            },
        };

        self.span.in_scope(|| match &resolution {
            Resolution::Main => debug!(host = host.unwrap_or("-"), "Main site host"),
            Resolution::Reserved(label) => {
                debug!(host = host.unwrap_or("-"), label = %label, "Reserved host");
            }
            Resolution::Tenant { token, tenant } => {
                debug!(token = %token, tenant_id = %tenant.id(), "Resolved tenant");
            }
            Resolution::TenantNotFound { token } => {
                debug!(token = %token, "No tenant for host");
            }
        });

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TenancyConfig;
    use crate::directory::InMemoryTenantDirectory;
    use crate::error::{DirectoryError, Result};
    use crate::tenant::{BrandingUpdate, NewTenant, TenantId, TradeType};
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Directory that fails every call.
    struct FailingDirectory;

    #[async_trait]
    impl TenantDirectory for FailingDirectory {
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Arc<Tenant>>> {
            Err(DirectoryError::unavailable("connection refused"))
        }

        async fn get(&self, _id: &TenantId) -> Result<Arc<Tenant>> {
            Err(DirectoryError::unavailable("connection refused"))
        }

        async fn list(&self) -> Result<Vec<Arc<Tenant>>> {
            Err(DirectoryError::unavailable("connection refused"))
        }

        async fn create(&self, _input: NewTenant) -> Result<Arc<Tenant>> {
            Err(DirectoryError::unavailable("connection refused"))
        }

        async fn update_branding(
            &self,
            _id: &TenantId,
            _update: BrandingUpdate,
        ) -> Result<Arc<Tenant>> {
            Err(DirectoryError::unavailable("connection refused"))
        }
    }

    /// Directory wrapper counting slug lookups.
    #[derive(Default)]
    struct CountingDirectory {
        inner: InMemoryTenantDirectory,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl TenantDirectory for CountingDirectory {
        async fn find_by_slug(&self, slug: &str) -> Result<Option<Arc<Tenant>>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_slug(slug).await
        }

        async fn get(&self, id: &TenantId) -> Result<Arc<Tenant>> {
            self.inner.get(id).await
        }

        async fn list(&self) -> Result<Vec<Arc<Tenant>>> {
            self.inner.list().await
        }

        async fn create(&self, input: NewTenant) -> Result<Arc<Tenant>> {
            self.inner.create(input).await
        }

        async fn update_branding(&self, id: &TenantId, update: BrandingUpdate) -> Result<Arc<Tenant>> {
            self.inner.update_branding(id, update).await
        }
    }

    async fn seeded() -> (TenantResolver, Arc<CountingDirectory>) {
        let directory = Arc::new(CountingDirectory::default());
        directory
            .create(NewTenant::new("Plaster Master", TradeType::Plastering))
            .await
            .unwrap();
        // A tenant whose slug collides with a reserved word.
        directory
            .create(NewTenant::new("API", TradeType::Other))
            .await
            .unwrap();

        let classifier = HostClassifier::new(&TenancyConfig::default());
        let resolver = TenantResolver::new(classifier, directory.clone());
        (resolver, directory)
    }

    #[tokio::test]
    async fn test_resolves_known_tenant() {
        let (resolver, directory) = seeded().await;

        let resolution = resolver
            .resolve_host(Some("plastermaster.workdoc360.com"))
            .await;

        let tenant = resolution.tenant().expect("tenant");
        assert_eq!(tenant.slug(), "plastermaster");
        assert_eq!(resolution.token(), Some("plastermaster"));
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_host_case_and_port_ignored() {
        let (resolver, _) = seeded().await;

        let resolution = resolver
            .resolve_host(Some("PlasterMaster.WorkDoc360.com:5000"))
            .await;
        assert!(resolution.is_tenant());
    }

    #[tokio::test]
    async fn test_unknown_tenant() {
        let (resolver, directory) = seeded().await;

        let resolution = resolver.resolve_host(Some("unknownco.workdoc360.com")).await;

        assert_eq!(
            resolution,
            Resolution::TenantNotFound {
                token: "unknownco".to_string()
            }
        );
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reserved_and_main_skip_lookup() {
        let (resolver, directory) = seeded().await;

        for host in [
            None,
            Some("workdoc360.com"),
            Some("www.workdoc360.com"),
            Some("localhost:5000"),
            Some("api.workdoc360.com"),
            Some("admin.workdoc360.com"),
        ] {
            assert!(!resolver.resolve_host(host).await.is_tenant(), "{host:?}");
        }

        assert_eq!(directory.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reserved_beats_registered_slug() {
        let (resolver, _) = seeded().await;

        let resolution = resolver.resolve_host(Some("api.workdoc360.com")).await;
        assert_eq!(resolution, Resolution::Reserved("api".to_string()));
        assert_eq!(resolution.token(), Some("api"));
    }

    #[tokio::test]
    async fn test_directory_fault_fails_open() {
        let classifier = HostClassifier::new(&TenancyConfig::default());
        let resolver = TenantResolver::new(classifier, Arc::new(FailingDirectory))
            .with_span(tracing::info_span!("tenant_resolver"));

        assert!(resolver.resolve("plastermaster").await.is_none());

        let resolution = resolver
            .resolve_host(Some("plastermaster.workdoc360.com"))
            .await;
        assert_eq!(
            resolution,
            Resolution::TenantNotFound {
                token: "plastermaster".to_string()
            }
        );
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_directory_fault_logs_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let classifier = HostClassifier::new(&TenancyConfig::default());
        let resolver = TenantResolver::new(classifier, Arc::new(FailingDirectory))
            .with_span(tracing::info_span!("tenant_resolver"));
        assert!(resolver.resolve("plastermaster").await.is_none());

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("tenant_resolver"), "{output}");
        assert!(output.contains("Tenant lookup failed"), "{output}");
        assert!(output.contains("token=plastermaster"), "{output}");
        assert!(output.contains("error="), "{output}");
        assert!(output.contains("connection refused"), "{output}");
    }

    #[tokio::test]
    async fn test_main_resolution_helpers() {
        let (resolver, _) = seeded().await;

        let resolution = resolver.resolve_host(Some("workdoc360.com")).await;
        assert_eq!(resolution, Resolution::Main);
        assert!(resolution.tenant().is_none());
        assert!(resolution.token().is_none());
    }
}
