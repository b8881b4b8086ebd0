//! [`ZoneConnection`]: the TSIG connection used for DNS UPDATE and AXFR.

use zonegate_crypto::{CryptoAlgebra, CryptoError};

use crate::error::ValidationError;
use crate::validators::{validate_name_length, validate_non_empty, validate_primary_server};

/// A TSIG-keyed connection to a backend nameserver.
///
/// Used by [`crate::Zone`] for two independent purposes: `connection` signs
/// DNS UPDATE messages, `transfer_connection` signs AXFR/IXFR zone
/// transfers. The `key` field carries the TSIG secret; whether it currently
/// holds plaintext or at-rest-encrypted bytes is a lifecycle fact tracked by
/// the caller, not by the type itself — see [`ZoneConnection::encrypted`]
/// and [`ZoneConnection::decrypted`].
#[derive(Clone, PartialEq, Eq)]
pub struct ZoneConnection {
    /// Display name for the connection, 1 to 255 characters.
    pub name: String,
    /// The TSIG key name as known to the backend nameserver.
    pub key_name: String,
    /// The TSIG secret, opaque bytes. Plaintext or encrypted depending on
    /// lifecycle stage; never logged.
    pub key: Vec<u8>,
    /// `host[:port]` of the backend nameserver. Host is a valid hostname or
    /// IPv4 literal; port, if present, is in `1..=65535`.
    pub primary_server: String,
}

impl std::fmt::Debug for ZoneConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneConnection")
            .field("name", &self.name)
            .field("key_name", &self.key_name)
            .field("key", &"<redacted>")
            .field("primary_server", &self.primary_server)
            .finish()
    }
}

impl ZoneConnection {
    /// Validate and construct a connection from raw fields.
    ///
    /// # Errors
    ///
    /// Returns every independent field failure together; validation never
    /// short-circuits on the first problem.
    pub fn new(
        name: impl Into<String>,
        key_name: impl Into<String>,
        key: impl Into<Vec<u8>>,
        primary_server: impl Into<String>,
    ) -> Result<Self, Vec<ValidationError>> {
        let name = name.into();
        let key_name = key_name.into();
        let key = key.into();
        let primary_server = primary_server.into();

        let mut errors = Vec::new();
        if let Err(msg) = validate_name_length(&name) {
            errors.push(ValidationError::new("name", msg));
        }
        if let Err(msg) = validate_non_empty(&key_name) {
            errors.push(ValidationError::new("keyName", msg));
        }
        if key.is_empty() {
            errors.push(ValidationError::new("key", "must not be empty"));
        }
        if let Err(msg) = validate_primary_server(&primary_server) {
            errors.push(ValidationError::new("primaryServer", msg));
        }

        if errors.is_empty() {
            Ok(Self { name, key_name, key, primary_server })
        } else {
            Err(errors)
        }
    }

    /// Return a copy with `key` passed through `crypto.encrypt`.
    ///
    /// # Errors
    ///
    /// Propagates the algebra's [`CryptoError`] unchanged; this is an
    /// infrastructural fault, never collapsed into a validation error.
    pub fn encrypted(&self, crypto: &dyn CryptoAlgebra) -> Result<Self, CryptoError> {
        Ok(Self { key: crypto.encrypt(&self.key)?, ..self.clone() })
    }

    /// Return a copy with `key` passed through `crypto.decrypt`.
    ///
    /// # Errors
    ///
    /// Propagates the algebra's [`CryptoError`] unchanged.
    pub fn decrypted(&self, crypto: &dyn CryptoAlgebra) -> Result<Self, CryptoError> {
        Ok(Self { key: crypto.decrypt(&self.key)?, ..self.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonegate_crypto::NoopCryptoAlgebra;

    fn connection() -> ZoneConnection {
        ZoneConnection::new("primary", "tsig-key", b"shh".to_vec(), "ns1.example.com:53").unwrap()
    }

    #[test]
    fn test_debug_should_redact_key() {
        let rendered = format!("{:?}", connection());
        assert!(!rendered.contains("shh"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_new_should_accumulate_every_field_error() {
        let errors = ZoneConnection::new("", "", Vec::<u8>::new(), "bad host:not-a-port").unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_noop_round_trip_invariant() {
        let connection = connection();
        let algebra = NoopCryptoAlgebra;
        let round_tripped = connection.encrypted(&algebra).unwrap().decrypted(&algebra).unwrap();
        assert_eq!(round_tripped, connection);
    }

    #[test]
    fn test_encrypted_should_change_key_bytes_for_non_identity_algebra() {
        use zonegate_crypto::AesGcmCryptoAlgebra;
        let algebra = AesGcmCryptoAlgebra::new(&[9u8; 32]).unwrap();
        let connection = connection();
        let encrypted = connection.encrypted(&algebra).unwrap();
        assert_ne!(encrypted.key, connection.key);
        let decrypted = encrypted.decrypted(&algebra).unwrap();
        assert_eq!(decrypted, connection);
    }
}
