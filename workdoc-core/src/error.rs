//! Configuration error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error type covering missing fields, invalid values,
/// and file access errors.
///
/// # Examples
///
/// ```
/// use workdoc_core::error::ConfigError;
///
/// let error = ConfigError::MissingField {
///     field: "root_domain".to_string(),
///     section: Some("tenancy".to_string()),
/// };
/// assert!(error.to_string().contains("root_domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// Required configuration field is missing.
    #[error("[Config] Missing field '{field}'{}", section.as_ref().map(|s| format!(" in section '{s}'")).unwrap_or_default())]
    MissingField {
        /// Name of the missing field.
        field: String,
        /// Optional section where the field should be.
        section: Option<String>,
    },

    /// Configuration value is invalid.
    #[error("[Config] Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Field with the invalid value.
        field: String,
        /// Reason why the value is invalid.
        reason: String,
    },

    /// Configuration file could not be read.
    #[error("[Config] Failed to read file '{path}': {reason}")]
    FileReadError {
        /// Path to the configuration file.
        path: String,
        /// Reason for the read failure.
        reason: String,
    },

    /// Configuration file format is invalid.
    #[error("[Config] Invalid format in '{path}': {reason}")]
    InvalidFormat {
        /// Path to the configuration file.
        path: String,
        /// Reason for the format error.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            section: None,
        }
    }

    /// Creates a missing field error with section.
    #[must_use]
    pub fn missing_field_in_section(field: impl Into<String>, section: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            section: Some(section.into()),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
