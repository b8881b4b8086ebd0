//! The authenticated [`Principal`] and the provider that resolves one from
//! an access key.

use std::collections::HashMap;
use std::fmt;

/// An authenticated caller.
///
/// A `Principal` is constructed only by an [`AuthPrincipalProvider`]; the
/// authenticator never synthesizes one. `secret_key` is redacted from the
/// `Debug` output so that accidentally logging a `Principal` cannot leak the
/// HMAC secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    /// Opaque caller identifier.
    pub user_id: String,
    /// The public access key, unique per principal.
    pub access_key: String,
    /// The HMAC secret key, stored encrypted at rest by callers; held
    /// decrypted only transiently during signature validation.
    pub secret_key: String,
    /// Group memberships, consumed by authorization layers outside this
    /// core.
    pub groups: Vec<String>,
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("user_id", &self.user_id)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("groups", &self.groups)
            .finish()
    }
}

/// Resolves an access key to the [`Principal`] that owns it.
///
/// Implementations may back this with a database, configuration file, or any
/// other credential store; absence is modeled as `None`, never a failure —
/// only infrastructural problems (the store being unreachable) should
/// surface as an error.
#[async_trait::async_trait]
pub trait AuthPrincipalProvider: Send + Sync {
    /// Look up the principal owning `access_key`.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructural faults (the backing store
    /// could not be reached); an unknown access key is `Ok(None)`.
    async fn get_auth_principal(&self, access_key: &str) -> anyhow::Result<Option<Principal>>;
}

/// A simple in-memory provider backed by a `HashMap`, keyed by access key.
///
/// Suitable for testing and for the demonstration composition root; a
/// production deployment implements [`AuthPrincipalProvider`] against its
/// own principal repository.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthPrincipalProvider {
    principals: HashMap<String, Principal>,
}

impl StaticAuthPrincipalProvider {
    /// Build a provider from an iterable of principals, keyed by their own
    /// `access_key`.
    #[must_use]
    pub fn new(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            principals: principals.into_iter().map(|p| (p.access_key.clone(), p)).collect(),
        }
    }
}

#[async_trait::async_trait]
impl AuthPrincipalProvider for StaticAuthPrincipalProvider {
    async fn get_auth_principal(&self, access_key: &str) -> anyhow::Result<Option<Principal>> {
        Ok(self.principals.get(access_key).cloned())
    }
}
