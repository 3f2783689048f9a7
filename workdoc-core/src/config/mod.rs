//! Configuration management module.
//!
//! This module provides a small configuration system supporting:
//! - YAML, TOML and JSON configuration file formats
//! - Validation with descriptive error messages
//! - Environment variable overrides
//!
//! # Example
//!
//! ```rust,ignore
//! use workdoc_core::config::{ConfigLoader, ConfigFormat};
//!
//! // Load from YAML file
//! let config: MyConfig = ConfigLoader::new()
//!     .with_env_prefix("WORKDOC")
//!     .load_file("workdoc.yaml")?;
//!
//! // Load from TOML string
//! let config: MyConfig = ConfigLoader::new()
//!     .load_str(toml_content, ConfigFormat::Toml)?;
//! ```

mod env;
mod loader;
mod traits;

pub use env::EnvOverride;
pub use loader::{ConfigFormat, ConfigLoader};
pub use traits::{Configurable, Validatable};
