//! Configuration loader supporting YAML, TOML and JSON formats.

use crate::config::{Configurable, Validatable};
use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

const SUPPORTED_EXTENSIONS: &str = "Unrecognized file extension. Supported: .yaml, .yml, .toml, .json";

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml)
    #[default]
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "yaml" | "yml" => Some(Self::Yaml),
                "toml" => Some(Self::Toml),
                "json" => Some(Self::Json),
                _ => None,
            })
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Configuration loader with support for multiple formats and environment overrides.
///
/// # Example
///
/// ```rust,ignore
/// use workdoc_core::config::ConfigLoader;
///
/// let config: ServerConfig = ConfigLoader::new()
///     .with_env_prefix("WORKDOC")
///     .load("workdoc.yaml")?;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix for overrides.
    env_prefix: Option<String>,
    /// Whether to validate after loading.
    validate: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env_prefix: None,
            validate: true,
        }
    }

    /// Sets the environment variable prefix for overrides.
    ///
    /// When set, [`ConfigLoader::load`] applies overrides from variables
    /// starting with this prefix (e.g. `WORKDOC_SERVER_PORT`).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Sets whether to validate the configuration after loading.
    ///
    /// Default is `true`.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Returns the environment variable prefix, if set.
    #[must_use]
    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    /// Loads a configuration file, applies environment overrides and validates it.
    ///
    /// A missing file is not an error: the default configuration is used
    /// instead, so a bare deployment can run from environment variables alone.
    pub fn load<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default + Configurable + Validatable,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut config: T = if path.exists() {
            self.load_file(path)?
        } else {
            T::default()
        };

        if let Some(prefix) = &self.env_prefix {
            config.apply_env_overrides(prefix);
        }

        if self.validate {
            config.validate()?;
        }

        Ok(config)
    }

    /// Loads configuration from a file.
    ///
    /// The format is automatically detected from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file format is not recognized
    /// - The content cannot be parsed
    pub fn load_file<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::InvalidFormat {
            path: path.display().to_string(),
            reason: SUPPORTED_EXTENSIONS.to_string(),
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        self.load_str(&content, format)
            .map_err(|e| match e {
                ConfigError::InvalidFormat { reason, .. } => ConfigError::InvalidFormat {
                    path: path.display().to_string(),
                    reason,
                },
                other => other,
            })
    }

    /// Loads configuration from a string with the specified format.
    pub fn load_str<T>(&self, content: &str, format: ConfigFormat) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let config: T = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                    path: "<string>".to_string(),
                    reason: format!("YAML parse error: {e}"),
                })?
            }
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                    path: "<string>".to_string(),
                    reason: format!("TOML parse error: {e}"),
                })?
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                    path: "<string>".to_string(),
                    reason: format!("JSON parse error: {e}"),
                })?
            }
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct SiteConfig {
        root_domain: String,
        port: u16,
        #[serde(default)]
        reserved: Vec<String>,
    }

    impl Default for SiteConfig {
        fn default() -> Self {
            Self {
                root_domain: "workdoc360.com".to_string(),
                port: 8080,
                reserved: vec!["api".to_string()],
            }
        }
    }

    impl Configurable for SiteConfig {
        fn apply_env_overrides(&mut self, prefix: &str) {
            crate::config::EnvOverride::apply_string(
                &format!("{prefix}_ROOT_DOMAIN"),
                &mut self.root_domain,
            );
        }

        fn env_var_names(prefix: &str) -> Vec<String> {
            vec![format!("{prefix}_ROOT_DOMAIN")]
        }
    }

    impl Validatable for SiteConfig {
        fn validate(&self) -> Result<(), ConfigError> {
            if self.port == 0 {
                return Err(ConfigError::invalid_value("port", "Port cannot be 0"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("workdoc.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("workdoc.YML")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("workdoc.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("workdoc.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("workdoc.ini")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("workdoc")), None);
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r"
root_domain: workdoc360.com
port: 8080
reserved: [api, admin]
";
        let config: SiteConfig = ConfigLoader::new()
            .load_str(yaml, ConfigFormat::Yaml)
            .unwrap();

        assert_eq!(config.root_domain, "workdoc360.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.reserved, vec!["api", "admin"]);
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
root_domain = "workdoc360.com"
port = 9000
"#;
        let config: SiteConfig = ConfigLoader::new()
            .load_str(toml, ConfigFormat::Toml)
            .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.reserved.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_format_error() {
        let result: Result<SiteConfig, _> =
            ConfigLoader::new().load_str("port: [not a number", ConfigFormat::Yaml);
        assert!(matches!(result, Err(ConfigError::InvalidFormat { .. })));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workdoc.ini");
        std::fs::write(&path, "port = 1").unwrap();

        let result: Result<SiteConfig, _> = ConfigLoader::new().load_file(&path);
        assert!(matches!(result, Err(ConfigError::InvalidFormat { .. })));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workdoc.json");
        std::fs::write(&path, r#"{"root_domain": "workdoc360.co.uk", "port": 3000}"#).unwrap();

        let loaded: SiteConfig = ConfigLoader::new().load_file(&path).unwrap();
        assert_eq!(loaded.root_domain, "workdoc360.co.uk");
        assert_eq!(loaded.port, 3000);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config: SiteConfig = ConfigLoader::new()
            .load(dir.path().join("absent.yaml"))
            .unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workdoc.yaml");
        std::fs::write(&path, "root_domain: workdoc360.com\nport: 0\n").unwrap();

        let result: Result<SiteConfig, _> = ConfigLoader::new().load(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let unchecked: SiteConfig = ConfigLoader::new()
            .with_validation(false)
            .load(&path)
            .unwrap();
        assert_eq!(unchecked.port, 0);
    }
}
