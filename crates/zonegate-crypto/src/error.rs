//! Error type for crypto algebra failures.

/// Failures a [`crate::CryptoAlgebra`] implementation can report.
///
/// The no-op algebra never produces these; they are only reachable from a
/// real encryption backend.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The supplied key material was the wrong length or otherwise invalid.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Encryption failed (the underlying AEAD implementation reported an error).
    #[error("encryption failed")]
    EncryptFailed,

    /// Decryption failed: either the ciphertext was truncated, or the
    /// authentication tag did not verify (wrong key or tampered data).
    #[error("decryption failed")]
    DecryptFailed,
}

impl From<CryptoError> for zonegate_core::ZonegateError {
    fn from(err: CryptoError) -> Self {
        zonegate_core::ZonegateError::Crypto(err.to_string())
    }
}
