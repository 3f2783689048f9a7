//! Hostname classification.
//!
//! Decides from the hostname alone whether a request targets the main site,
//! a reserved service prefix, or possibly a tenant portal. Classification is
//! pure: it reads only the hostname and the classifier's fixed policy.

use std::collections::BTreeSet;

use crate::config::TenancyConfig;

/// Outcome of classifying a hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostClass {
    /// The marketing site: root domain, `www`, local/preview hosts and
    /// anything malformed.
    Main,
    /// Leading label is a reserved prefix. Never resolves to a tenant.
    Reserved(String),
    /// Leading label may be a tenant slug.
    Candidate(String),
}

impl HostClass {
    /// Returns the leading label extracted from the host, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Main => None,
            Self::Reserved(label) | Self::Candidate(label) => Some(label),
        }
    }
}

/// Normalizes a raw host value: trims, lowercases, drops a `:port` suffix
/// and a trailing root dot.
///
/// # Example
///
/// ```
/// use workdoc_tenancy::normalize_host;
///
/// assert_eq!(normalize_host(" PlasterMaster.WorkDoc360.com:443 "), "plastermaster.workdoc360.com");
/// ```
#[must_use]
pub fn normalize_host(raw: &str) -> String {
    let host = raw.trim();

    let host = if let Some(bracketed) = host.strip_prefix('[') {
        // IPv6 literal, e.g. `[::1]:8080`
        bracketed.split(']').next().unwrap_or_default()
    } else {
        match host.rsplit_once(':') {
            Some((name, port))
                if !name.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
            {
                name
            }
            _ => host,
        }
    };

    host.trim_end_matches('.').to_ascii_lowercase()
}

/// Classifies request hostnames against the configured root domain.
#[derive(Debug, Clone)]
pub struct HostClassifier {
    root_domain: String,
    www_domain: String,
    reserved: BTreeSet<String>,
    development_markers: Vec<String>,
}

impl HostClassifier {
    /// Creates a classifier from the tenancy configuration.
    #[must_use]
    pub fn new(config: &TenancyConfig) -> Self {
        let root_domain = normalize_host(&config.root_domain);
        Self {
            www_domain: format!("www.{root_domain}"),
            root_domain,
            reserved: config
                .reserved_subdomains
                .iter()
                .map(|label| label.trim().to_ascii_lowercase())
                .collect(),
            development_markers: config
                .development_markers
                .iter()
                .map(|marker| marker.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Returns the normalized root domain.
    #[must_use]
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Returns true if `label` is a reserved prefix.
    #[must_use]
    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved.contains(&label.to_ascii_lowercase())
    }

    /// Returns true if a tenant owning `slug` would be reached at
    /// `<slug>.<root>`, i.e. that host classifies as a candidate for
    /// exactly that slug.
    #[must_use]
    pub fn is_routable_slug(&self, slug: &str) -> bool {
        matches!(
            self.classify(&format!("{slug}.{}", self.root_domain)),
            HostClass::Candidate(token) if token == slug
        )
    }

    /// Returns true if the normalized host is a local or preview host.
    #[must_use]
    pub fn is_development_host(&self, host: &str) -> bool {
        self.development_markers
            .iter()
            .any(|marker| host.contains(marker.as_str()))
    }

    /// Classifies a hostname.
    ///
    /// Rules, in order:
    /// 1. empty, local or preview hosts are [`HostClass::Main`];
    /// 2. the root domain and `www.<root>` are [`HostClass::Main`];
    /// 3. fewer than two labels, or an empty label, is [`HostClass::Main`];
    /// 4. a reserved leading label is [`HostClass::Reserved`];
    /// 5. anything else is a [`HostClass::Candidate`] for its leading label.
    #[must_use]
    pub fn classify(&self, host: &str) -> HostClass {
        let host = normalize_host(host);

        if host.is_empty() || self.is_development_host(&host) {
            return HostClass::Main;
        }

        if host == self.root_domain || host == self.www_domain {
            return HostClass::Main;
        }

        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return HostClass::Main;
        }

        let leading = labels[0];
        if self.reserved.contains(leading) {
            HostClass::Reserved(leading.to_string())
        } else {
            HostClass::Candidate(leading.to_string())
        }
    }
}
