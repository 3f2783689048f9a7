//! Tenant directory error types.

use thiserror::Error;

/// Errors raised by a [`TenantDirectory`](crate::TenantDirectory).
///
/// Hostname resolution never surfaces these to callers: the resolver logs
/// them and degrades to "no tenant". They are visible on the onboarding and
/// branding write paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Another tenant already owns the slug.
    #[error("Slug already taken: {slug}")]
    SlugTaken {
        /// The contested slug.
        slug: String,
    },

    /// The slug is empty, too long or not lowercase alphanumeric.
    #[error("Invalid slug '{slug}': {reason}")]
    InvalidSlug {
        /// The rejected slug.
        slug: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A tenant field failed validation.
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Reason for the failure.
        reason: String,
    },

    /// No tenant with the given id.
    #[error("Tenant not found: {id}")]
    NotFound {
        /// Id that was looked up.
        id: String,
    },

    /// The backing store could not be reached or failed the query.
    #[error("Tenant directory unavailable: {reason}")]
    Unavailable {
        /// Reason reported by the store.
        reason: String,
    },
}

impl DirectoryError {
    /// Creates a slug taken error.
    #[must_use]
    pub fn slug_taken(slug: impl Into<String>) -> Self {
        Self::SlugTaken { slug: slug.into() }
    }

    /// Creates an invalid slug error.
    #[must_use]
    pub fn invalid_slug(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSlug {
            slug: slug.into(),
            reason: reason.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DirectoryError::slug_taken("plastermaster");
        assert_eq!(err.to_string(), "Slug already taken: plastermaster");

        let err = DirectoryError::validation("primary_color", "expected #RRGGBB");
        assert!(err.to_string().contains("primary_color"));
    }
}
