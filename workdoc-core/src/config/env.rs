//! Environment variable override helpers.

/// Helpers for overriding configuration values from environment variables.
///
/// Unset variables leave the target untouched; values that fail to parse
/// are ignored.
pub struct EnvOverride;

impl EnvOverride {
    /// Applies an environment variable override to a string value.
    pub fn apply_string(var_name: &str, target: &mut String) {
        if let Ok(value) = std::env::var(var_name) {
            *target = value;
        }
    }

    /// Applies an environment variable override to a numeric value.
    pub fn apply_number<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(value) = std::env::var(var_name)
            && let Ok(parsed) = value.parse()
        {
            *target = parsed;
        }
    }

    /// Applies an environment variable override to a boolean value.
    pub fn apply_bool(var_name: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(var_name) {
            match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => *target = true,
                "false" | "0" | "no" | "off" => *target = false,
                _ => {}
            }
        }
    }

    /// Applies an environment variable override to a list of strings.
    ///
    /// The variable holds a comma-separated list; blank entries are dropped.
    pub fn apply_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(value) = std::env::var(var_name) {
            *target = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
