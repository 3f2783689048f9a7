//! # WorkDoc360 Tenancy
//!
//! Tenant directory and hostname-based tenant resolution.
//!
//! Every WorkDoc360 customer company is a tenant served from its own
//! subdomain of the root domain (`plastermaster.workdoc360.com`). The bare
//! root domain and its `www` form serve the marketing site.
//!
//! This crate provides:
//! - The tenant model and the [`TenantDirectory`] store abstraction
//! - [`slugify`] for deriving a tenant's hostname label at onboarding
//! - [`HostClassifier`], a pure hostname classifier
//! - [`TenantResolver`], which combines classification with a single
//!   directory lookup and fails open to the main site
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use workdoc_tenancy::{
//!     HostClassifier, InMemoryTenantDirectory, NewTenant, Resolution, TenancyConfig,
//!     TenantDirectory, TenantResolver, TradeType,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TenancyConfig::default();
//! let directory = Arc::new(InMemoryTenantDirectory::new(config.slug_max_length));
//! directory
//!     .create(NewTenant::new("Plaster Master Ltd.", TradeType::Plastering))
//!     .await?;
//!
//! let resolver = TenantResolver::new(HostClassifier::new(&config), directory);
//! let resolution = resolver
//!     .resolve_host(Some("plastermaster.workdoc360.com"))
//!     .await;
//! assert!(matches!(resolution, Resolution::Tenant { .. }));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

mod classifier;
mod config;
mod directory;
mod error;
mod resolver;
mod slug;
mod tenant;

pub use classifier::{HostClass, HostClassifier, normalize_host};
pub use config::TenancyConfig;
pub use directory::{InMemoryTenantDirectory, TenantDirectory};
pub use error::{DirectoryError, Result};
pub use resolver::{Resolution, TenantResolver};
pub use slug::{DEFAULT_SLUG_MAX_LEN, MAX_DNS_LABEL_LEN, is_canonical_slug, slugify};
pub use tenant::{
    BrandingUpdate, NewTenant, PostalAddress, Tenant, TenantBranding, TenantId, TradeType,
    is_hex_color,
};
