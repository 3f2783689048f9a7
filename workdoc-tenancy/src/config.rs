//! Tenant routing configuration.

use serde::{Deserialize, Serialize};
use workdoc_core::{ConfigError, Configurable, EnvOverride, Validatable};

use crate::slug::{DEFAULT_SLUG_MAX_LEN, MAX_DNS_LABEL_LEN};

/// Configuration for hostname classification and slug derivation.
///
/// The reserved words and the slug length are business policy, so they
/// live here rather than in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// Root domain tenants are served under (e.g. `workdoc360.com`).
    #[serde(default = "default_root_domain")]
    pub root_domain: String,

    /// Header set by the reverse proxy carrying the original host.
    #[serde(default = "default_forwarded_host_header")]
    pub forwarded_host_header: String,

    /// Leading labels that never resolve to a tenant.
    #[serde(default = "default_reserved_subdomains")]
    pub reserved_subdomains: Vec<String>,

    /// Substrings marking local or preview hosts, which always serve the main site.
    #[serde(default = "default_development_markers")]
    pub development_markers: Vec<String>,

    /// Maximum slug length produced at onboarding.
    #[serde(default = "default_slug_max_length")]
    pub slug_max_length: usize,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            root_domain: default_root_domain(),
            forwarded_host_header: default_forwarded_host_header(),
            reserved_subdomains: default_reserved_subdomains(),
            development_markers: default_development_markers(),
            slug_max_length: default_slug_max_length(),
        }
    }
}

impl TenancyConfig {
    /// Creates a configuration for the given root domain with default policy.
    #[must_use]
    pub fn for_root_domain(root_domain: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into(),
            ..Self::default()
        }
    }
}

impl Configurable for TenancyConfig {
    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_ROOT_DOMAIN"), &mut self.root_domain);
        EnvOverride::apply_string(
            &format!("{prefix}_FORWARDED_HOST_HEADER"),
            &mut self.forwarded_host_header,
        );
        EnvOverride::apply_list(
            &format!("{prefix}_RESERVED_SUBDOMAINS"),
            &mut self.reserved_subdomains,
        );
        EnvOverride::apply_list(
            &format!("{prefix}_DEVELOPMENT_MARKERS"),
            &mut self.development_markers,
        );
        EnvOverride::apply_number(
            &format!("{prefix}_SLUG_MAX_LENGTH"),
            &mut self.slug_max_length,
        );
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        [
            "ROOT_DOMAIN",
            "FORWARDED_HOST_HEADER",
            "RESERVED_SUBDOMAINS",
            "DEVELOPMENT_MARKERS",
            "SLUG_MAX_LENGTH",
        ]
        .iter()
        .map(|name| format!("{prefix}_{name}"))
        .collect()
    }
}

impl Validatable for TenancyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let root = self.root_domain.trim();
        if root.is_empty() {
            return Err(ConfigError::missing_field_in_section("root_domain", "tenancy"));
        }
        if !root.contains('.') || root.starts_with('.') || root.ends_with('.') {
            return Err(ConfigError::invalid_value(
                "tenancy.root_domain",
                format!("'{root}' is not a domain name"),
            ));
        }

        if self.forwarded_host_header.trim().is_empty() {
            return Err(ConfigError::missing_field_in_section(
                "forwarded_host_header",
                "tenancy",
            ));
        }

        if let Some(label) = self
            .reserved_subdomains
            .iter()
            .find(|label| label.is_empty() || label.contains('.'))
        {
            return Err(ConfigError::invalid_value(
                "tenancy.reserved_subdomains",
                format!("'{label}' is not a single hostname label"),
            ));
        }
        if let Some(label) = self
            .reserved_subdomains
            .iter()
            .find(|label| label.chars().any(|c| c.is_ascii_uppercase()))
        {
            return Err(ConfigError::invalid_value(
                "tenancy.reserved_subdomains",
                format!("'{label}' must be lowercase"),
            ));
        }

        if self.development_markers.iter().any(String::is_empty) {
            return Err(ConfigError::invalid_value(
                "tenancy.development_markers",
                "markers must not be empty",
            ));
        }

        if !(1..=MAX_DNS_LABEL_LEN).contains(&self.slug_max_length) {
            return Err(ConfigError::invalid_value(
                "tenancy.slug_max_length",
                format!("must be between 1 and {MAX_DNS_LABEL_LEN}"),
            ));
        }

        Ok(())
    }
}

fn default_root_domain() -> String {
    "workdoc360.com".to_string()
}

fn default_forwarded_host_header() -> String {
    "x-forwarded-host".to_string()
}

fn default_reserved_subdomains() -> Vec<String> {
    [
        "www", "api", "app", "admin", "mail", "ftp", "cdn", "static", "assets", "blog", "help",
        "support", "status", "docs", "dashboard", "portal", "staging", "dev", "test",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_development_markers() -> Vec<String> {
    [
        "localhost",
        "127.0.0.1",
        "0.0.0.0",
        ".replit.dev",
        ".repl.co",
        ".replit.app",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_slug_max_length() -> usize {
    DEFAULT_SLUG_MAX_LEN
}
