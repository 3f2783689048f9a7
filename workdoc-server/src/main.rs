//! # WorkDoc360 Server
//!
//! Main entry point for the WorkDoc360 service.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! workdoc-server
//!
//! # Run with custom configuration file
//! workdoc-server --config /etc/workdoc/workdoc.yaml
//!
//! # Run with environment variable overrides
//! WORKDOC_SERVER_PORT=9090 WORKDOC_ROOT_DOMAIN=workdoc360.co.uk workdoc-server
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use workdoc_core::Validatable;
use workdoc_server::{ServerConfig, WorkDocServer};

/// WorkDoc360 Server
#[derive(Parser, Debug)]
#[command(name = "workdoc-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "workdoc.yaml")]
    config: PathBuf,

    /// Override server host
    #[arg(long, env = "WORKDOC_SERVER_HOST")]
    host: Option<String>,

    /// Override server port
    #[arg(long, env = "WORKDOC_SERVER_PORT")]
    port: Option<u16>,

    /// Override the root domain tenants are served under
    #[arg(long, env = "WORKDOC_ROOT_DOMAIN")]
    root_domain: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;

    // Validate only mode
    if args.validate {
        println!("Configuration is valid");
        return Ok(());
    }

    let mut server = WorkDocServer::new(config);
    server.init_logging()?;
    server.run().await?;

    info!("WorkDoc360 server stopped");
    Ok(())
}

/// Loads configuration from file and applies command-line overrides.
fn load_config(args: &Args) -> anyhow::Result<ServerConfig> {
    if !args.config.exists() {
        eprintln!(
            "Configuration file not found: {}, using defaults",
            args.config.display()
        );
    }

    let mut config = WorkDocServer::load_config(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    // Apply command-line overrides
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(root_domain) = &args.root_domain {
        config.tenancy.root_domain.clone_from(root_domain);
    }
    if args.debug {
        config.logging.level = "debug".to_string();
    }

    config
        .validate()
        .context("Invalid configuration after command-line overrides")?;

    Ok(config)
}
