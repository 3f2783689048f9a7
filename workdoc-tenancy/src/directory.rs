//! Tenant directory.
//!
//! The directory is the store of record for tenants, keyed by slug for
//! hostname resolution and by id for administration.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{DirectoryError, Result};
use crate::slug::{DEFAULT_SLUG_MAX_LEN, is_canonical_slug, slugify};
use crate::tenant::{BrandingUpdate, NewTenant, Tenant, TenantId};

/// Store of tenant records.
///
/// Implementations are shared across request handlers and must be safe to
/// call concurrently. Hostname resolution only ever calls
/// [`TenantDirectory::find_by_slug`].
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Looks up a tenant by exact slug.
    ///
    /// `Ok(None)` means no tenant owns the slug. `Err` is reserved for
    /// faults of the store itself.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Arc<Tenant>>>;

    /// Gets a tenant by id.
    async fn get(&self, id: &TenantId) -> Result<Arc<Tenant>>;

    /// Lists all tenants, oldest first.
    async fn list(&self) -> Result<Vec<Arc<Tenant>>>;

    /// Onboards a new tenant.
    ///
    /// The slug is derived from the name with [`slugify`] unless the input
    /// carries one, in which case it must already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::SlugTaken`] if another tenant owns the slug,
    /// [`DirectoryError::InvalidSlug`] if the slug is empty or not canonical,
    /// and [`DirectoryError::Validation`] for invalid name or branding.
    async fn create(&self, input: NewTenant) -> Result<Arc<Tenant>>;

    /// Applies a branding update to a tenant. The slug never changes.
    async fn update_branding(&self, id: &TenantId, update: BrandingUpdate) -> Result<Arc<Tenant>>;
}

/// In-process tenant directory backed by concurrent maps.
#[derive(Debug)]
pub struct InMemoryTenantDirectory {
    /// All tenants indexed by ID.
    tenants_by_id: DashMap<TenantId, Arc<Tenant>>,
    /// Tenant IDs indexed by slug.
    tenants_by_slug: DashMap<String, TenantId>,
    /// Maximum length of derived slugs.
    slug_max_length: usize,
}

impl Default for InMemoryTenantDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_SLUG_MAX_LEN)
    }
}

impl InMemoryTenantDirectory {
    /// Creates an empty directory deriving slugs up to `slug_max_length` characters.
    #[must_use]
    pub fn new(slug_max_length: usize) -> Self {
        Self {
            tenants_by_id: DashMap::new(),
            tenants_by_slug: DashMap::new(),
            slug_max_length,
        }
    }

    /// Returns the number of tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tenants_by_id.len()
    }

    /// Returns true if the directory holds no tenants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tenants_by_id.is_empty()
    }

    /// Returns true if a tenant owns `slug`.
    #[must_use]
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.tenants_by_slug.contains_key(slug)
    }

    /// Returns the slug onboarding would assign to `input`.
    pub fn slug_for(&self, input: &NewTenant) -> Result<String> {
        match &input.slug {
            Some(explicit) if is_canonical_slug(explicit, self.slug_max_length) => {
                Ok(explicit.clone())
            }
            Some(explicit) => Err(DirectoryError::invalid_slug(
                explicit,
                format!(
                    "must be 1 to {} lowercase letters or digits",
                    self.slug_max_length
                ),
            )),
            None => {
                let derived = slugify(&input.name, self.slug_max_length);
                if derived.is_empty() {
                    Err(DirectoryError::invalid_slug(
                        derived,
                        "name contains no letters or digits",
                    ))
                } else {
                    Ok(derived)
                }
            }
        }
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Arc<Tenant>>> {
        let Some(id) = self.tenants_by_slug.get(slug).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };

        Ok(self
            .tenants_by_id
            .get(&id)
            .map(|entry| Arc::clone(entry.value())))
    }

    async fn get(&self, id: &TenantId) -> Result<Arc<Tenant>> {
        self.tenants_by_id
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DirectoryError::not_found(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<Arc<Tenant>>> {
        let mut tenants: Vec<Arc<Tenant>> = self
            .tenants_by_id
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        tenants.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.slug().cmp(b.slug()))
        });
        Ok(tenants)
    }

    async fn create(&self, input: NewTenant) -> Result<Arc<Tenant>> {
        input.validate()?;
        let slug = self.slug_for(&input)?;

        // Claim the slug before publishing the record so concurrent
        // onboardings cannot both win.
        let tenant = match self.tenants_by_slug.entry(slug.clone()) {
            Entry::Occupied(_) => return Err(DirectoryError::slug_taken(slug)),
            Entry::Vacant(vacant) => {
                let tenant = Arc::new(Tenant::onboard(input, slug));
                self.tenants_by_id
                    .insert(tenant.id().clone(), Arc::clone(&tenant));
                vacant.insert(tenant.id().clone());
                tenant
            }
        };

        info!(
            tenant_id = %tenant.id(),
            slug = %tenant.slug(),
            name = %tenant.name(),
            "Onboarded tenant"
        );
        Ok(tenant)
    }

    async fn update_branding(&self, id: &TenantId, update: BrandingUpdate) -> Result<Arc<Tenant>> {
        let mut entry = self
            .tenants_by_id
            .get_mut(id)
            .ok_or_else(|| DirectoryError::not_found(id.to_string()))?;

        // Clone the inner Tenant so readers holding the old Arc are unaffected.
        let mut tenant = (**entry.value()).clone();
        tenant.apply(update)?;

        let tenant = Arc::new(tenant);
        *entry.value_mut() = Arc::clone(&tenant);

        debug!(tenant_id = %id, slug = %tenant.slug(), "Updated tenant branding");
        Ok(tenant)
    }
}
