//! Error types for the zone domain model and reverse-zone helpers.

use std::fmt;

/// A single field-level validation failure.
///
/// The zone builder never short-circuits: every independent field is
/// checked, and every failure is collected into a `Vec<ValidationError>`
/// returned together, so a caller can display all problems at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"connection.primaryServer"`.
    pub field: String,
    /// Human-readable description of what failed.
    pub message: String,
}

impl ValidationError {
    /// Construct a new field-level error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The single error shape the reverse-zone helpers ever surface to callers.
///
/// Per the error-handling design, any arithmetic or parse fault encountered
/// while converting a PTR name or testing CIDR containment is caught here
/// and re-expressed as `InvalidRequest`, never propagated as an
/// infrastructural fault, because the inputs are user-supplied record names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidRequest(pub String);

impl InvalidRequest {
    /// The standard wording used when a record name neither looks like an
    /// IPv4 nor an IPv6 reverse-zone PTR.
    #[must_use]
    pub fn not_a_valid_ip(record_name: &str, zone_name: &str) -> Self {
        Self(format!(
            "RecordSet {record_name} does not specify a valid IP address in zone {zone_name}"
        ))
    }
}
