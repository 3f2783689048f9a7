//! # WorkDoc360 Server
//!
//! Server entry point for the WorkDoc360 multi-tenant platform.
//!
//! This crate provides:
//! - Configuration loading with `WORKDOC_*` environment overrides
//! - Logging initialization
//! - Tenant directory seeding from configuration
//! - Graceful shutdown on SIGINT and SIGTERM

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{ServerError, WorkDocServer};
pub use shutdown::ShutdownController;
