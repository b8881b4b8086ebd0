//! Configuration-driven selection of a [`CryptoAlgebra`] implementation.
//!
//! Per the spec's design note, algebra selection is a configuration value
//! threaded in at composition time, not a hidden global. This module is the
//! narrow factory that turns that configuration value into a live algebra.

use std::sync::Arc;

use crate::algebra::{CryptoAlgebra, NoopCryptoAlgebra};
use crate::aesgcm::AesGcmCryptoAlgebra;
use crate::error::CryptoError;

/// The class of encryption configured for a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoSelection {
    /// Identity algebra. Test configurations only, per the spec's external
    /// interfaces section.
    Noop,
    /// AES-256-GCM, keyed by 32 raw bytes.
    AesGcm {
        /// The 32-byte key, as raw bytes (not hex-encoded).
        key: Vec<u8>,
    },
}

impl CryptoSelection {
    /// Build the live algebra this selection describes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if an `AesGcm` selection carries a
    /// key of the wrong length.
    pub fn build(&self) -> Result<Arc<dyn CryptoAlgebra>, CryptoError> {
        match self {
            CryptoSelection::Noop => Ok(Arc::new(NoopCryptoAlgebra)),
            CryptoSelection::AesGcm { key } => {
                Ok(Arc::new(AesGcmCryptoAlgebra::new(key)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_selection_should_build() {
        let algebra = CryptoSelection::Noop.build().unwrap();
        assert_eq!(algebra.encrypt(b"x").unwrap(), b"x");
    }

    #[test]
    fn test_aes_gcm_selection_should_build_with_valid_key() {
        let selection = CryptoSelection::AesGcm { key: vec![1u8; 32] };
        assert!(selection.build().is_ok());
    }

    #[test]
    fn test_aes_gcm_selection_should_reject_invalid_key() {
        let selection = CryptoSelection::AesGcm { key: vec![1u8; 4] };
        assert!(matches!(selection.build(), Err(CryptoError::InvalidKey(_))));
    }
}
