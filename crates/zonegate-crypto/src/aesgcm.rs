//! AES-256-GCM backed [`CryptoAlgebra`] for production deployments.
//!
//! TSIG keys are small (typically <64 bytes), so a single-shot AEAD call per
//! `encrypt`/`decrypt` is appropriate; there is no streaming requirement.
//! The nonce is generated per call and stored alongside the ciphertext
//! (`nonce || ciphertext`), the conventional layout for single-shot AEAD
//! encryption at rest.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key};
use zeroize::Zeroizing;

use crate::algebra::CryptoAlgebra;
use crate::error::CryptoError;

const NONCE_LEN: usize = 12;

/// AES-256-GCM algebra over a caller-supplied 32-byte key.
///
/// The key is held in a [`Zeroizing`] buffer so it is wiped from memory when
/// the algebra is dropped.
pub struct AesGcmCryptoAlgebra {
    key: Zeroizing<[u8; 32]>,
}

impl AesGcmCryptoAlgebra {
    /// Construct the algebra from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if `key_bytes` is not exactly 32
    /// bytes (AES-256 requires a 256-bit key).
    pub fn new(key_bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; 32] = key_bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKey(format!("expected 32 bytes, got {}", key_bytes.len())))?;
        Ok(Self {
            key: Zeroizing::new(key),
        })
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_slice()))
    }
}

impl CryptoAlgebra for AesGcmCryptoAlgebra {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let mut ciphertext = self
            .cipher()
            .encrypt(&nonce, plaintext)
            .map_err(|_| CryptoError::EncryptFailed)?;
        let mut out = nonce.to_vec();
        out.append(&mut ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < NONCE_LEN {
            return Err(CryptoError::DecryptFailed);
        }
        let (nonce_bytes, body) = ciphertext.split_at(NONCE_LEN);
        self.cipher()
            .decrypt(nonce_bytes.into(), body)
            .map_err(|_| CryptoError::DecryptFailed)
    }
}

impl std::fmt::Debug for AesGcmCryptoAlgebra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmCryptoAlgebra").finish_non_exhaustive()
    }
}
