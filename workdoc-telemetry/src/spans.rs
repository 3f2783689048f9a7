//! Span definitions for request tracing.

use tracing::{Span, info_span};

/// Create a span for an HTTP request.
///
/// # Example
///
/// ```
/// use workdoc_telemetry::spans::request_span;
///
/// let span = request_span("GET", "/api/site", Some("plastermaster.workdoc360.com"));
/// let _guard = span.enter();
/// ```
#[must_use]
pub fn request_span(method: &str, path: &str, host: Option<&str>) -> Span {
    info_span!(
        "request",
        method = %method,
        path = %path,
        host = host.unwrap_or("-"),
        otel.kind = "server"
    )
}

/// Create the span the tenant resolver records its events under.
///
/// The resolver is handed this span at construction so that its fault
/// events carry a stable target and can be filtered independently.
#[must_use]
pub fn tenant_resolver_span(root_domain: &str) -> Span {
    info_span!("tenant_resolver", root_domain = %root_domain)
}

/// Create a span for a tenant directory write (onboarding or branding update).
#[must_use]
pub fn directory_write_span(operation: &str, slug: &str) -> Span {
    info_span!("tenant_directory", operation = %operation, slug = %slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_construct_without_subscriber() {
        let request = request_span("GET", "/api/tenant", None);
        let resolver = tenant_resolver_span("workdoc360.com");
        let write = directory_write_span("create", "plastermaster");

        // Without a subscriber every span is disabled, but entering is still valid.
        let _g1 = request.enter();
        let _g2 = resolver.enter();
        let _g3 = write.enter();
    }
}
