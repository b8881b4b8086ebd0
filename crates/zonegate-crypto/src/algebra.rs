//! The [`CryptoAlgebra`] capability and its no-op implementation.

use crate::error::CryptoError;

/// A two-method capability for encrypting and decrypting opaque byte
/// material, used by the zone model to move TSIG keys between their
/// plaintext and at-rest encrypted forms.
///
/// Implementations must be synchronous and safe for concurrent use: the
/// algebra is the one piece of shared state the control-plane core holds
/// (see the crate-level docs), and it is invoked from many independent
/// authenticator runs at once.
pub trait CryptoAlgebra: Send + Sync {
    /// Encrypt `plaintext`, returning the at-rest representation.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt `ciphertext`, returning the original plaintext.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Identity algebra: `encrypt`/`decrypt` both return the input unchanged.
///
/// Required by the spec for test configurations, and used in production
/// whenever `encryptUserSecrets` is configured `false` (the stored secret is
/// already plaintext and no algebra work is needed).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCryptoAlgebra;

impl CryptoAlgebra for NoopCryptoAlgebra {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(plaintext.to_vec())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(ciphertext.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_should_round_trip() {
        let algebra = NoopCryptoAlgebra;
        let plaintext = b"shh-its-a-secret";
        let encrypted = algebra.encrypt(plaintext).unwrap();
        assert_eq!(encrypted, plaintext);
        let decrypted = algebra.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}
