//! Tenant entity definition.
//!
//! A tenant is one customer company. Its slug is fixed at onboarding; its
//! display attributes (name, trade, address, branding) can be updated by
//! the company's administrators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DirectoryError, Result};

/// Unique identifier for a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Creates a new random tenant ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TenantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Construction trade a company works in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    /// Scaffolding erection and inspection.
    Scaffolding,
    /// Plastering and rendering.
    Plastering,
    /// General building contractor.
    GeneralBuilder,
    /// Electrical installation.
    Electrical,
    /// Plumbing.
    Plumbing,
    /// Roofing.
    Roofing,
    /// Joinery and carpentry.
    Joinery,
    /// Painting and decorating.
    PaintingDecorating,
    /// Groundworks and civils.
    Groundworks,
    /// Bricklaying.
    Bricklaying,
    /// Dry lining and partitions.
    DryLining,
    /// Flooring.
    Flooring,
    /// Heating, ventilation and air conditioning.
    Hvac,
    /// Any other trade.
    #[default]
    Other,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Scaffolding => "Scaffolding",
            Self::Plastering => "Plastering",
            Self::GeneralBuilder => "General Builder",
            Self::Electrical => "Electrical",
            Self::Plumbing => "Plumbing",
            Self::Roofing => "Roofing",
            Self::Joinery => "Joinery",
            Self::PaintingDecorating => "Painting & Decorating",
            Self::Groundworks => "Groundworks",
            Self::Bricklaying => "Bricklaying",
            Self::DryLining => "Dry Lining",
            Self::Flooring => "Flooring",
            Self::Hvac => "Heating & Ventilation",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

/// UK postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// First address line.
    pub line1: String,
    /// Optional second address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// Town or city.
    pub town: String,
    /// Postcode.
    pub postcode: String,
}

/// Portal branding for a tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantBranding {
    /// Logo URL.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Primary color (`#RRGGBB`).
    #[serde(default)]
    pub primary_color: Option<String>,
    /// Secondary color (`#RRGGBB`).
    #[serde(default)]
    pub secondary_color: Option<String>,
    /// Accent color (`#RRGGBB`).
    #[serde(default)]
    pub accent_color: Option<String>,
}

impl TenantBranding {
    /// Checks that every color present is a `#RRGGBB` hex string.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
            ("accent_color", &self.accent_color),
        ] {
            if let Some(color) = value {
                validate_color(field, color)?;
            }
        }
        Ok(())
    }
}

/// Returns true if `value` is a `#RRGGBB` hex color.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_color(field: &str, value: &str) -> Result<()> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(DirectoryError::validation(
            field,
            format!("'{value}' is not a #RRGGBB color"),
        ))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DirectoryError::validation("name", "must not be empty"));
    }
    Ok(())
}

/// A tenant (customer company) in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    id: TenantId,
    name: String,
    slug: String,
    trade_type: TradeType,
    address: Option<PostalAddress>,
    branding: TenantBranding,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Creates a new tenant with the given name, slug and trade.
    ///
    /// The slug is taken as-is; directories derive and check it before
    /// calling this.
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>, trade_type: TradeType) -> Self {
        let now = Utc::now();
        Self {
            id: TenantId::new(),
            name: name.into(),
            slug: slug.into(),
            trade_type,
            address: None,
            branding: TenantBranding::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a tenant from onboarding input under an already-checked slug.
    pub(crate) fn onboard(input: NewTenant, slug: String) -> Self {
        let mut tenant = Self::new(input.name.trim(), slug, input.trade_type);
        tenant.address = input.address;
        tenant.branding = input.branding;
        tenant
    }

    /// Returns the tenant ID.
    #[must_use]
    pub fn id(&self) -> &TenantId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slug (the tenant's hostname label).
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the trade.
    #[must_use]
    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Returns the postal address, if recorded.
    #[must_use]
    pub fn address(&self) -> Option<&PostalAddress> {
        self.address.as_ref()
    }

    /// Returns the portal branding.
    #[must_use]
    pub fn branding(&self) -> &TenantBranding {
        &self.branding
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the portal hostname under the given root domain.
    #[must_use]
    pub fn portal_host(&self, root_domain: &str) -> String {
        format!("{}.{}", self.slug, root_domain)
    }

    /// Applies a validated branding update. The slug never changes.
    pub fn apply(&mut self, update: BrandingUpdate) -> Result<()> {
        update.validate()?;

        let BrandingUpdate {
            name,
            trade_type,
            address,
            logo_url,
            primary_color,
            secondary_color,
            accent_color,
        } = update;

        if let Some(name) = name {
            self.name = name.trim().to_string();
        }
        if let Some(trade_type) = trade_type {
            self.trade_type = trade_type;
        }
        if address.is_some() {
            self.address = address;
        }
        if logo_url.is_some() {
            self.branding.logo_url = logo_url;
        }
        if primary_color.is_some() {
            self.branding.primary_color = primary_color;
        }
        if secondary_color.is_some() {
            self.branding.secondary_color = secondary_color;
        }
        if accent_color.is_some() {
            self.branding.accent_color = accent_color;
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}

/// Input for onboarding a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTenant {
    /// Display name, e.g. "Plaster Master Ltd."
    pub name: String,
    /// Explicit slug. Derived from `name` when absent.
    #[serde(default)]
    pub slug: Option<String>,
    /// Trade the company works in.
    #[serde(default)]
    pub trade_type: TradeType,
    /// Postal address.
    #[serde(default)]
    pub address: Option<PostalAddress>,
    /// Initial branding.
    #[serde(default)]
    pub branding: TenantBranding,
}

impl NewTenant {
    /// Creates onboarding input with a derived slug and default branding.
    #[must_use]
    pub fn new(name: impl Into<String>, trade_type: TradeType) -> Self {
        Self {
            name: name.into(),
            slug: None,
            trade_type,
            address: None,
            branding: TenantBranding::default(),
        }
    }

    /// Sets an explicit slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: PostalAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the initial branding.
    #[must_use]
    pub fn with_branding(mut self, branding: TenantBranding) -> Self {
        self.branding = branding;
        self
    }

    /// Validates the name and branding. Slug checks belong to the directory.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        self.branding.validate()
    }
}

/// Partial update of a tenant's display attributes.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New trade.
    #[serde(default)]
    pub trade_type: Option<TradeType>,
    /// New postal address.
    #[serde(default)]
    pub address: Option<PostalAddress>,
    /// New logo URL.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// New primary color.
    #[serde(default)]
    pub primary_color: Option<String>,
    /// New secondary color.
    #[serde(default)]
    pub secondary_color: Option<String>,
    /// New accent color.
    #[serde(default)]
    pub accent_color: Option<String>,
}

impl BrandingUpdate {
    /// Validates the fields present in the update.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
            ("accent_color", &self.accent_color),
        ] {
            if let Some(color) = value {
                validate_color(field, color)?;
            }
        }
        Ok(())
    }

    /// Returns true if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.trade_type.is_none()
            && self.address.is_none()
            && self.logo_url.is_none()
            && self.primary_color.is_none()
            && self.secondary_color.is_none()
            && self.accent_color.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_parsing() {
        let id = TenantId::new();
        let parsed: TenantId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<TenantId>().is_err());
    }

    #[test]
    fn test_tenant_creation() {
        let tenant = Tenant::new("Plaster Master Ltd.", "plastermaster", TradeType::Plastering);

        assert_eq!(tenant.name(), "Plaster Master Ltd.");
        assert_eq!(tenant.slug(), "plastermaster");
        assert_eq!(tenant.trade_type(), TradeType::Plastering);
        assert!(tenant.address().is_none());
        assert_eq!(tenant.created_at(), tenant.updated_at());
        assert_eq!(
            tenant.portal_host("workdoc360.com"),
            "plastermaster.workdoc360.com"
        );
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#1e40af"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("1e40af"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#12345g"));
        assert!(!is_hex_color("#1234567"));
    }

    #[test]
    fn test_apply_update() {
        let mut tenant = Tenant::new("Plaster Master", "plastermaster", TradeType::Plastering);
        let update = BrandingUpdate {
            name: Some("  Plaster Master Ltd  ".to_string()),
            primary_color: Some("#1e40af".to_string()),
            ..Default::default()
        };

        tenant.apply(update).unwrap();

        assert_eq!(tenant.name(), "Plaster Master Ltd");
        assert_eq!(tenant.slug(), "plastermaster");
        assert_eq!(tenant.branding().primary_color.as_deref(), Some("#1e40af"));
        assert!(tenant.branding().secondary_color.is_none());
        assert!(tenant.updated_at() >= tenant.created_at());
    }

    #[test]
    fn test_apply_rejects_bad_color_without_change() {
        let mut tenant = Tenant::new("Plaster Master", "plastermaster", TradeType::Plastering);
        let update = BrandingUpdate {
            name: Some("Renamed".to_string()),
            accent_color: Some("orange".to_string()),
            ..Default::default()
        };

        let err = tenant.apply(update).unwrap_err();
        assert!(matches!(err, DirectoryError::Validation { ref field, .. } if field == "accent_color"));
        assert_eq!(tenant.name(), "Plaster Master");
    }

    #[test]
    fn test_new_tenant_validation() {
        assert!(NewTenant::new("   ", TradeType::Other).validate().is_err());

        let bad_branding = NewTenant::new("Acme Roofing", TradeType::Roofing).with_branding(
            TenantBranding {
                primary_color: Some("blue".to_string()),
                ..Default::default()
            },
        );
        assert!(bad_branding.validate().is_err());

        assert!(
            NewTenant::new("Acme Roofing", TradeType::Roofing)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_update_is_empty() {
        assert!(BrandingUpdate::default().is_empty());
        let update = BrandingUpdate {
            trade_type: Some(TradeType::Joinery),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_trade_type_serde() {
        let json = serde_json::to_string(&TradeType::PaintingDecorating).unwrap();
        assert_eq!(json, "\"painting_decorating\"");
        let parsed: TradeType = serde_json::from_str("\"general_builder\"").unwrap();
        assert_eq!(parsed, TradeType::GeneralBuilder);
        assert_eq!(TradeType::Hvac.to_string(), "Heating & Ventilation");
    }

    #[test]
    fn test_new_tenant_from_yaml() {
        let yaml = r##"
name: Plaster Master Ltd.
trade_type: plastering
address:
  line1: 12 Mill Lane
  town: Leeds
  postcode: LS1 4AB
branding:
  primary_color: "#1e40af"
"##;
        let input: NewTenant = serde_yaml::from_str(yaml).unwrap();
        assert!(input.slug.is_none());
        assert_eq!(input.trade_type, TradeType::Plastering);
        assert_eq!(input.address.unwrap().town, "Leeds");
        assert_eq!(input.branding.primary_color.as_deref(), Some("#1e40af"));
    }
}
