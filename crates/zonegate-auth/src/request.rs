//! The opaque request descriptor the authenticator consumes.

/// A transport-neutral view of an incoming HTTP request: just enough for
/// signature verification, nothing the caller's HTTP framework doesn't
/// already have lying around.
///
/// Callers materialize streaming bodies into a byte-exact `Vec<u8>` before
/// invoking the authenticator; the body itself is passed separately to
/// [`crate::authenticate`], not stored here, so it is never accidentally
/// logged alongside request metadata.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The HTTP method, e.g. `"GET"`.
    pub method: String,
    /// The request path, not including the query string.
    pub uri: String,
    /// The raw query string, not including the leading `?`.
    pub query_string: String,
    /// All request headers, in the order they appeared on the wire.
    /// Duplicate header names are preserved; callers that need "first match"
    /// semantics get it from [`RequestContext::header`].
    pub headers: Vec<(String, String)>,
}

impl RequestContext {
    /// Find a header by name, case-insensitively. When the header was
    /// repeated, returns the first occurrence in wire order; the rest are
    /// ignored, matching the spec's duplicate-header policy.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header_name, _)| header_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Borrow the headers as `(&str, &str)` pairs, the shape the canonical
    /// request builder expects.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}
