//! Slug derivation for tenant hostnames.

/// Default maximum slug length.
pub const DEFAULT_SLUG_MAX_LEN: usize = 30;

/// Longest label a DNS name may carry; slugs are used as labels.
pub const MAX_DNS_LABEL_LEN: usize = 63;

/// Derives a tenant slug from a display name.
///
/// Lowercases, keeps ASCII letters and digits only (whitespace, hyphens,
/// punctuation and non-ASCII characters are dropped) and truncates to
/// `max_len` characters. The result may be empty when the name has no ASCII
/// alphanumerics; callers must reject that.
///
/// The function is deterministic and idempotent:
/// `slugify(&slugify(x, n), n) == slugify(x, n)`.
///
/// # Example
///
/// ```
/// use workdoc_tenancy::slugify;
///
/// assert_eq!(slugify("Plaster Master Ltd.", 30), "plastermasterltd");
/// assert_eq!(slugify("J&K Scaffolding-Services", 10), "jkscaffold");
/// ```
#[must_use]
pub fn slugify(display_name: &str, max_len: usize) -> String {
    display_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(max_len)
        .collect()
}

/// Returns true if `slug` is already in the form [`slugify`] produces for
/// the given maximum length and is not empty.
#[must_use]
pub fn is_canonical_slug(slug: &str, max_len: usize) -> bool {
    !slug.is_empty()
        && slug.len() <= max_len
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
