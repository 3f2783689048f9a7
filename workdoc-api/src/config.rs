//! API configuration types.
//!
//! This module provides configuration for the API server including:
//! - Server binding address and port
//! - Request timeout
//! - CORS settings

use serde::{Deserialize, Serialize};
use std::time::Duration;
use workdoc_core::{ConfigError, Configurable, EnvOverride, Validatable};

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Enable request logging
    #[serde(default = "default_true")]
    pub enable_request_logging: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
            request_timeout_secs: default_request_timeout(),
            enable_request_logging: true,
        }
    }
}

impl ApiConfig {
    /// Returns the server bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Configurable for ApiConfig {
    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_HOST"), &mut self.host);
        EnvOverride::apply_number(&format!("{prefix}_PORT"), &mut self.port);
        EnvOverride::apply_number(
            &format!("{prefix}_REQUEST_TIMEOUT_SECS"),
            &mut self.request_timeout_secs,
        );
        EnvOverride::apply_bool(
            &format!("{prefix}_ENABLE_REQUEST_LOGGING"),
            &mut self.enable_request_logging,
        );
        EnvOverride::apply_list(
            &format!("{prefix}_CORS_ALLOWED_ORIGINS"),
            &mut self.cors.allowed_origins,
        );
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        [
            "HOST",
            "PORT",
            "REQUEST_TIMEOUT_SECS",
            "ENABLE_REQUEST_LOGGING",
            "CORS_ALLOWED_ORIGINS",
        ]
        .iter()
        .map(|name| format!("{prefix}_{name}"))
        .collect()
    }
}

impl Validatable for ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::missing_field_in_section("host", "server"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid_value(
                "server.port",
                "port must be non-zero",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "server.request_timeout_secs",
                "timeout must be at least one second",
            ));
        }
        Ok(())
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Allowed origins (empty means all origins)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allow credentials
    #[serde(default)]
    pub allow_credentials: bool,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec![],
            allow_credentials: false,
            max_age_secs: default_max_age(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_max_age() -> u64 {
    3600
}
