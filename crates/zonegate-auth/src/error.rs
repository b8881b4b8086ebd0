//! Internal parse-failure taxonomy for the `Authorization` header.
//!
//! These variants are never surfaced directly to callers; [`crate::outcome`]
//! maps each one onto the spec-pinned [`crate::AuthenticationOutcome`]
//! wording. Keeping them distinct here (rather than building outcome strings
//! inline) is what lets the "missing authentication token" case be routed to
//! `CredentialsMissing` while every other parse failure routes to
//! `CredentialsRejected`.

/// Failures recognized while parsing an `Authorization` header.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HeaderParseError {
    /// No `Authorization` header was present on the request at all.
    #[error("Authorization header not found")]
    MissingAuthHeader,

    /// The header did not match the `AWS4-HMAC-SHA256 Credential=..., SignedHeaders=..., Signature=...` grammar.
    #[error("Authorization header could not be parsed")]
    MalformedHeader,
}
