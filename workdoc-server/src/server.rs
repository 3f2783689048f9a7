//! Main server implementation.
//!
//! Wires configuration, logging, the tenant directory and the API server
//! together.

#![allow(clippy::used_underscore_binding)]

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use workdoc_api::{ApiServer, AppState};
use workdoc_core::ConfigLoader;
use workdoc_telemetry::logging::init_logging;
use workdoc_telemetry::spans::tenant_resolver_span;
use workdoc_tenancy::{HostClassifier, InMemoryTenantDirectory, TenantDirectory};

use crate::config::{ENV_PREFIX, ServerConfig};
use crate::shutdown::{ShutdownController, setup_signal_handlers};

/// The WorkDoc360 server.
pub struct WorkDocServer {
    config: ServerConfig,
    shutdown: ShutdownController,
    _log_guards: Vec<WorkerGuard>,
}

impl WorkDocServer {
    /// Creates a server from a validated configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            shutdown: ShutdownController::new(),
            _log_guards: Vec::new(),
        }
    }

    /// Loads configuration from `path`, applying `WORKDOC_*` environment
    /// overrides and validating the result.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ServerError> {
        ConfigLoader::new()
            .with_env_prefix(ENV_PREFIX)
            .load(path)
            .map_err(|e| ServerError::ConfigError(e.to_string()))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> &ShutdownController {
        &self.shutdown
    }

    /// Initializes logging. Call once, before [`WorkDocServer::run`].
    pub fn init_logging(&mut self) -> Result<(), ServerError> {
        let guards = init_logging(&self.config.logging).map_err(|e| {
            ServerError::InitializationError(format!("Failed to initialize logging: {e}"))
        })?;

        self._log_guards = guards;
        info!("Logging initialized with level: {}", self.config.logging.level);
        Ok(())
    }

    /// Builds the tenant directory and onboards the configured tenants.
    pub async fn build_directory(&self) -> Result<Arc<InMemoryTenantDirectory>, ServerError> {
        let directory = Arc::new(InMemoryTenantDirectory::new(
            self.config.tenancy.slug_max_length,
        ));
        let classifier = HostClassifier::new(&self.config.tenancy);

        for seed in &self.config.tenants {
            let tenant = directory.create(seed.clone()).await.map_err(|e| {
                ServerError::InitializationError(format!(
                    "Failed to onboard configured tenant '{}': {e}",
                    seed.name
                ))
            })?;

            if !classifier.is_routable_slug(tenant.slug()) {
                warn!(
                    slug = %tenant.slug(),
                    "Configured tenant's subdomain never resolves to a tenant and will not be reachable"
                );
            }
        }

        info!(tenants = directory.len(), "Tenant directory ready");
        Ok(directory)
    }

    /// Builds the application state over `directory`.
    #[must_use]
    pub fn build_state(&self, directory: Arc<dyn TenantDirectory>) -> Arc<AppState> {
        Arc::new(AppState::new(
            self.config.server.clone(),
            self.config.tenancy.clone(),
            directory,
            tenant_resolver_span(&self.config.tenancy.root_domain),
        ))
    }

    /// Runs the server until SIGINT or SIGTERM.
    pub async fn run(&self) -> Result<(), ServerError> {
        info!("Starting WorkDoc360 server...");

        let directory = self.build_directory().await?;
        let api_server = ApiServer::new(self.build_state(directory));

        // Setup signal handlers
        let shutdown_ctrl = self.shutdown.clone();
        tokio::spawn(async move {
            setup_signal_handlers(shutdown_ctrl).await;
        });

        // Create shutdown signal for API server
        let shutdown = self.shutdown.clone();
        let shutdown_signal = async move {
            shutdown.wait_for_shutdown().await;
        };

        api_server
            .run_with_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::RuntimeError(format!("API server error: {e}")))?;

        info!("Graceful shutdown complete");
        Ok(())
    }

    /// Initiates shutdown.
    pub fn shutdown(&self) {
        self.shutdown.initiate_shutdown();
    }
}

/// Server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A component failed to start.
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// The server failed while running.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use workdoc_tenancy::{NewTenant, TradeType};

    fn config_with_seeds(seeds: Vec<NewTenant>) -> ServerConfig {
        ServerConfig {
            tenants: seeds,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_build_directory_seeds_tenants() {
        let server = WorkDocServer::new(config_with_seeds(vec![
            NewTenant::new("Plaster Master Ltd.", TradeType::Plastering).with_slug("plastermaster"),
            NewTenant::new("Smith & Sons Roofing", TradeType::Roofing),
        ]));

        let directory = server.build_directory().await.unwrap();

        assert_eq!(directory.len(), 2);
        assert!(directory.contains_slug("plastermaster"));
        assert!(directory.contains_slug("smithsonsroofing"));
    }

    #[tokio::test]
    async fn test_build_directory_rejects_duplicate_seeds() {
        let server = WorkDocServer::new(config_with_seeds(vec![
            NewTenant::new("Acme Joinery", TradeType::Joinery),
            NewTenant::new("ACME joinery", TradeType::Joinery),
        ]));

        let err = server.build_directory().await.unwrap_err();
        assert!(matches!(err, ServerError::InitializationError(_)));
        assert!(err.to_string().contains("ACME joinery"));
    }

    #[tokio::test]
    async fn test_build_directory_keeps_unreachable_seeds() {
        let server = WorkDocServer::new(config_with_seeds(vec![
            NewTenant::new("API Scaffolding", TradeType::Scaffolding).with_slug("api"),
            NewTenant::new("Localhost Plumbing", TradeType::Plumbing),
        ]));

        let directory = server.build_directory().await.unwrap();
        assert!(directory.contains_slug("api"));
        assert!(directory.contains_slug("localhostplumbing"));

        let state = server.build_state(directory);
        let resolution = state
            .resolver()
            .resolve_host(Some("localhostplumbing.workdoc360.com"))
            .await;
        assert!(!resolution.is_tenant());
    }

    #[tokio::test]
    async fn test_build_state_resolves_seeded_tenant() {
        let server = WorkDocServer::new(config_with_seeds(vec![NewTenant::new(
            "Plaster Master",
            TradeType::Plastering,
        )]));

        let directory = server.build_directory().await.unwrap();
        let state = server.build_state(directory);

        let resolution = state
            .resolver()
            .resolve_host(Some("plastermaster.workdoc360.com"))
            .await;
        assert!(resolution.is_tenant());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = ServerConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        // Port 0 is rejected by validation but fine for binding in tests.
        let server = WorkDocServer::new(config);
        server.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(5), server.run()).await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[test]
    fn test_load_config_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workdoc.yaml");
        std::fs::write(&path, "server: [not, a, map]\n").unwrap();

        let err = WorkDocServer::load_config(&path).unwrap_err();
        assert!(matches!(err, ServerError::ConfigError(_)));
    }

    #[test]
    fn test_server_error_display() {
        let err = ServerError::ConfigError("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }
}
