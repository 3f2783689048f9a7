//! Logging configuration types.

use serde::{Deserialize, Serialize};
use workdoc_core::{ConfigError, Configurable, EnvOverride, Validatable};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level (e.g., "info", "debug", "trace").
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Output targets
    #[serde(default = "default_outputs")]
    pub outputs: Vec<LogOutput>,

    /// Include thread IDs in log output
    #[serde(default)]
    pub include_thread_id: bool,

    /// Include file and line information
    #[serde(default)]
    pub include_file_info: bool,

    /// Include span enter/exit events
    #[serde(default)]
    pub include_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            outputs: default_outputs(),
            include_thread_id: false,
            include_file_info: false,
            include_span_events: false,
        }
    }
}

impl Configurable for LogConfig {
    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_LEVEL"), &mut self.level);
        if let Ok(format) = std::env::var(format!("{prefix}_FORMAT")) {
            match format.to_lowercase().as_str() {
                "json" => self.format = LogFormat::Json,
                "pretty" => self.format = LogFormat::Pretty,
                _ => {}
            }
        }
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        vec![format!("{prefix}_LEVEL"), format!("{prefix}_FORMAT")]
    }
}

impl Validatable for LogConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("'{}' is not one of {}", self.level, LEVELS.join(", ")),
            ));
        }

        if self.outputs.is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.outputs",
                "at least one output is required",
            ));
        }

        for output in &self.outputs {
            if let LogOutput::File { path, .. } = output
                && path.trim().is_empty()
            {
                return Err(ConfigError::missing_field_in_section("path", "logging.outputs"));
            }
        }

        Ok(())
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_outputs() -> Vec<LogOutput> {
    vec![LogOutput::Stdout]
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format for log aggregation systems
    #[default]
    Json,
    /// Human-readable format for development
    Pretty,
}

/// Log output target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to file with optional rotation
    File {
        /// Directory path for log files
        path: String,
        /// Rotation configuration
        rotation: Option<RotationConfig>,
    },
}

/// Log rotation configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationConfig {
    /// Rotate logs hourly
    Hourly,
    /// Rotate logs daily
    Daily,
    /// Never rotate (single file)
    Never,
}
