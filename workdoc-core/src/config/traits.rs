//! Configuration traits for validation and environment overrides.

use crate::error::ConfigError;

/// Trait for types that can be validated.
///
/// # Example
///
/// ```rust
/// use workdoc_core::config::Validatable;
/// use workdoc_core::error::ConfigError;
///
/// struct ListenConfig {
///     port: u16,
///     host: String,
/// }
///
/// impl Validatable for ListenConfig {
///     fn validate(&self) -> Result<(), ConfigError> {
///         if self.port == 0 {
///             return Err(ConfigError::invalid_value("port", "Port cannot be 0"));
///         }
///         if self.host.is_empty() {
///             return Err(ConfigError::missing_field("host"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validates the configuration.
    ///
    /// Returns `Ok(())` if the configuration is valid, or a `ConfigError`
    /// describing what is invalid.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Trait for types that support environment variable overrides.
pub trait Configurable: Sized {
    /// Applies environment variable overrides to the configuration.
    ///
    /// `prefix` is the variable prefix for this section (e.g. `WORKDOC_SERVER`).
    fn apply_env_overrides(&mut self, prefix: &str);

    /// Returns the environment variable names that can override this configuration.
    fn env_var_names(prefix: &str) -> Vec<String>;
}
