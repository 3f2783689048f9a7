//! Server configuration module.
//!
//! Combines the API, tenancy and logging sections with the tenants seeded
//! into the directory at startup.

use serde::{Deserialize, Serialize};
use workdoc_api::ApiConfig;
use workdoc_core::{ConfigError, Configurable, Validatable};
use workdoc_telemetry::logging::LogConfig;
use workdoc_tenancy::{NewTenant, TenancyConfig};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "WORKDOC";

/// Server configuration.
///
/// Contains all settings needed to start and run the WorkDoc360 server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ApiConfig,

    /// Hostname classification and slug policy.
    #[serde(default)]
    pub tenancy: TenancyConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LogConfig,

    /// Companies onboarded into the directory at startup.
    #[serde(default)]
    pub tenants: Vec<NewTenant>,
}

impl Configurable for ServerConfig {
    fn apply_env_overrides(&mut self, prefix: &str) {
        self.server.apply_env_overrides(&format!("{prefix}_SERVER"));
        self.tenancy.apply_env_overrides(prefix);
        self.logging.apply_env_overrides(&format!("{prefix}_LOG"));
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        let mut names = ApiConfig::env_var_names(&format!("{prefix}_SERVER"));
        names.extend(TenancyConfig::env_var_names(prefix));
        names.extend(LogConfig::env_var_names(&format!("{prefix}_LOG")));
        names
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.tenancy.validate()?;
        self.logging.validate()?;

        for (index, tenant) in self.tenants.iter().enumerate() {
            if tenant.name.trim().is_empty() {
                return Err(ConfigError::missing_field_in_section(
                    "name",
                    format!("tenants[{index}]"),
                ));
            }
            tenant.validate().map_err(|e| {
                ConfigError::invalid_value(format!("tenants[{index}]"), e.to_string())
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workdoc_core::{ConfigFormat, ConfigLoader};
    use workdoc_tenancy::TradeType;

    const SAMPLE: &str = r##"
server:
  host: 127.0.0.1
  port: 3000
tenancy:
  root_domain: workdoc360.com
  slug_max_length: 24
logging:
  level: debug
  format: pretty
tenants:
  - name: Plaster Master Ltd.
    slug: plastermaster
    trade_type: plastering
    branding:
      primary_color: "#1e40af"
  - name: Smith & Sons Roofing
    trade_type: roofing
"##;

    #[test]
    fn test_default_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.tenants.is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let config: ServerConfig = ConfigLoader::new()
            .load_str(SAMPLE, ConfigFormat::Yaml)
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.tenancy.slug_max_length, 24);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.tenants.len(), 2);
        assert_eq!(config.tenants[0].slug.as_deref(), Some("plastermaster"));
        assert_eq!(config.tenants[1].trade_type, TradeType::Roofing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_invalid_seed() {
        let mut config = ServerConfig::default();
        config.tenants.push(NewTenant::new("  ", TradeType::Other));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tenants[0]"));
    }

    #[test]
    fn test_env_var_names() {
        let names = ServerConfig::env_var_names(ENV_PREFIX);
        for expected in [
            "WORKDOC_SERVER_HOST",
            "WORKDOC_SERVER_PORT",
            "WORKDOC_ROOT_DOMAIN",
            "WORKDOC_LOG_LEVEL",
        ] {
            assert!(names.contains(&expected.to_string()), "{expected}");
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config: ServerConfig = ConfigLoader::new()
            .load(dir.path().join("workdoc.yaml"))
            .unwrap();

        assert_eq!(config.tenancy.root_domain, "workdoc360.com");
    }

    #[test]
    fn test_load_file_with_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workdoc.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        // SAFETY: unique prefix, not read by other tests.
        unsafe {
            std::env::set_var("WORKDOC_CFG_TEST_SERVER_PORT", "9191");
            std::env::set_var("WORKDOC_CFG_TEST_ROOT_DOMAIN", "workdoc360.co.uk");
        }

        let config: ServerConfig = ConfigLoader::new()
            .with_env_prefix("WORKDOC_CFG_TEST")
            .load(&path)
            .unwrap();

        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.tenancy.root_domain, "workdoc360.co.uk");
    }
}
