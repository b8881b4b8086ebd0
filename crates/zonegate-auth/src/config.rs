//! Dependency-injected configuration for the authenticator.
//!
//! Per the spec's design note, configuration is a plain value passed in at
//! composition time — never a process-wide singleton looked up at call
//! sites.

use zonegate_crypto::CryptoSelection;

/// Settings the authenticator needs that are not part of any single request.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Gates secret decryption. When `false`, the stored secret is already
    /// plaintext and the crypto algebra is never invoked.
    pub encrypt_user_secrets: bool,
    /// Which [`CryptoSelection`] to build an algebra from when
    /// `encrypt_user_secrets` is `true`.
    pub crypto: CryptoSelection,
}

impl AuthConfig {
    /// Read settings from the process environment.
    ///
    /// `ENCRYPT_USER_SECRETS` defaults to `false`. When `true`,
    /// `ZONEGATE_AES_KEY_HEX` must hold a 64-character hex-encoded 32-byte
    /// key or the resulting [`CryptoSelection`] will fail to build.
    #[must_use]
    pub fn from_env() -> Self {
        let encrypt_user_secrets = std::env::var("ENCRYPT_USER_SECRETS")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        let crypto = if encrypt_user_secrets {
            match std::env::var("ZONEGATE_AES_KEY_HEX").ok().and_then(|hex_key| hex::decode(hex_key).ok()) {
                Some(key) => CryptoSelection::AesGcm { key },
                None => CryptoSelection::Noop,
            }
        } else {
            CryptoSelection::Noop
        };

        Self { encrypt_user_secrets, crypto }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            encrypt_user_secrets: false,
            crypto: CryptoSelection::Noop,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
