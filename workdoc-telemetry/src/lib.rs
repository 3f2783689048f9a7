//! # WorkDoc360 Telemetry
//!
//! Logging and tracing for the WorkDoc360 service.
//!
//! This crate provides:
//! - Structured logging with JSON and pretty formats
//! - Optional rolling log files
//! - Span constructors for HTTP requests and tenant resolution
//!
//! Logging is initialized once by the binary. Library crates only emit
//! `tracing` events and never configure a subscriber themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Logging configuration and initialization
pub mod logging;

/// Span definitions
pub mod spans;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logging::{LogConfig, LogFormat, LogOutput, init_logging};
    pub use crate::spans::*;
}
