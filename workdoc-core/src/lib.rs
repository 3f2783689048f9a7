//! # WorkDoc360 Core
//!
//! Shared building blocks for the WorkDoc360 service crates.
//!
//! This crate provides:
//! - Configuration loading from YAML, TOML and JSON files
//! - Environment variable overrides for configuration values
//! - Validation traits implemented by every configuration section
//! - The configuration error type shared across crates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

/// Configuration management
pub mod config;

/// Error types
pub mod error;

pub use config::{ConfigFormat, ConfigLoader, Configurable, EnvOverride, Validatable};
pub use error::ConfigError;
