//! Infrastructural error type shared by the zonegate crates.
//!
//! This is deliberately narrow: the two *expected* failure taxonomies of the
//! control plane — [`AuthenticationOutcome`](../zonegate_auth/enum.AuthenticationOutcome.html)
//! and the zone builder's accumulated `Vec<ValidationError>` — are plain data,
//! not `std::error::Error` impls, because callers pattern-match on them rather
//! than propagate them with `?`. `ZonegateError` covers everything else: the
//! faults a caller cannot recover a user-facing decision from and must map to
//! a 5xx instead.

/// Infrastructural faults that the core cannot classify as an authentication
/// or validation outcome.
#[derive(Debug, thiserror::Error)]
pub enum ZonegateError {
    /// A configuration value was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The pluggable [`crate` crypto algebra] failed in a way the core does
    /// not attempt to interpret (e.g. a key-management backend was
    /// unreachable).
    #[error("crypto algebra failure: {0}")]
    Crypto(String),

    /// Catch-all for faults that propagate unchanged, per the contract that
    /// infrastructural faults are never collapsed into an expected outcome.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for fallible operations against [`ZonegateError`].
pub type ZonegateResult<T> = Result<T, ZonegateError>;
