//! The authenticator's public contract: [`AuthenticationOutcome`] and the
//! [`authenticate`] function that produces it.

use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zonegate_crypto::CryptoAlgebra;

use crate::canonical::build_canonical_request;
use crate::config::AuthConfig;
use crate::error::HeaderParseError;
use crate::principal::{AuthPrincipalProvider, Principal};
use crate::request::RequestContext;
use crate::sigv4::{build_string_to_sign, compute_signature, derive_signing_key, hash_payload, parse_authorization_header};

/// The result of attempting to authenticate a request.
///
/// Only these three variants are ever produced by [`authenticate`];
/// everything else (provider I/O failures, crypto errors) propagates as an
/// `Err` so the caller can map it to a 5xx response instead of a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// The request's signature validated against the resolved principal.
    Authenticated(Principal),
    /// No `Authorization` header was present.
    CredentialsMissing,
    /// An `Authorization` header was present but rejected, with the reason.
    CredentialsRejected(String),
}

fn header_parse_failure(err: &HeaderParseError) -> AuthenticationOutcome {
    match err {
        HeaderParseError::MissingAuthHeader => AuthenticationOutcome::CredentialsMissing,
        HeaderParseError::MalformedHeader => {
            AuthenticationOutcome::CredentialsRejected(err.to_string())
        }
    }
}

/// Authenticate an incoming request per AWS Signature V4.
///
/// See the module-level docs of this crate for the full algorithm. This
/// function never logs the decrypted secret, the signature, or the body; it
/// only emits structural facts (the claimed access key, the outcome kind).
///
/// # Errors
///
/// Propagates infrastructural faults from the principal provider or the
/// crypto algebra unchanged — these are never collapsed into
/// [`AuthenticationOutcome::CredentialsRejected`].
pub async fn authenticate(
    request: &RequestContext,
    body: &[u8],
    provider: &dyn AuthPrincipalProvider,
    crypto: &dyn CryptoAlgebra,
    config: &AuthConfig,
) -> anyhow::Result<AuthenticationOutcome> {
    let Some(auth_header) = request.header("Authorization") else {
        debug!("authorization header not found");
        return Ok(AuthenticationOutcome::CredentialsMissing);
    };

    let parsed = match parse_authorization_header(auth_header) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(error = %err, "authorization header rejected during parse");
            return Ok(header_parse_failure(&err));
        }
    };

    for signed in &parsed.signed_headers {
        if request.header(signed).is_none() {
            warn!(header = %signed, "signed header missing from request");
            return Ok(AuthenticationOutcome::CredentialsRejected(format!(
                "Required signed header '{signed}' was missing"
            )));
        }
    }

    let Some(timestamp) = request.header("x-amz-date") else {
        warn!("x-amz-date header missing from request");
        return Ok(AuthenticationOutcome::CredentialsRejected(
            "Required signed header 'x-amz-date' was missing".to_owned(),
        ));
    };

    let principal = match provider.get_auth_principal(&parsed.access_key_id).await? {
        Some(principal) => principal,
        None => {
            debug!(access_key = %parsed.access_key_id, "access key not found");
            return Ok(AuthenticationOutcome::CredentialsRejected(format!(
                "Account with accessKey {} specified was not found",
                parsed.access_key_id
            )));
        }
    };

    let secret_key = if config.encrypt_user_secrets {
        let decrypted = crypto
            .decrypt(principal.secret_key.as_bytes())
            .map_err(|e| anyhow::anyhow!("secret decryption failed: {e}"))?;
        String::from_utf8(decrypted).map_err(|e| anyhow::anyhow!("decrypted secret was not valid utf-8: {e}"))?
    } else {
        principal.secret_key.clone()
    };

    let payload_hash = hash_payload(body);
    let signed_header_refs: Vec<&str> = parsed.signed_headers.iter().map(String::as_str).collect();
    let header_pairs = request.header_pairs();
    let canonical_request = build_canonical_request(
        &request.method,
        &request.uri,
        &request.query_string,
        &header_pairs,
        &signed_header_refs,
        &payload_hash,
    );
    let canonical_request_hash = hash_payload(canonical_request.as_bytes());
    let string_to_sign = build_string_to_sign(timestamp, &parsed.credential_scope(), &canonical_request_hash);
    let signing_key = derive_signing_key(&secret_key, &parsed.date, &parsed.region, &parsed.service);
    let expected_signature = compute_signature(&signing_key, &string_to_sign);

    let signatures_match = expected_signature.len() == parsed.signature.len()
        && bool::from(expected_signature.as_bytes().ct_eq(parsed.signature.as_bytes()));

    debug!(access_key = %parsed.access_key_id, matched = signatures_match, "signature verification complete");

    if signatures_match {
        Ok(AuthenticationOutcome::Authenticated(principal))
    } else {
        Ok(AuthenticationOutcome::CredentialsRejected(
            "Request signature could not be validated".to_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::StaticAuthPrincipalProvider;
    use zonegate_crypto::NoopCryptoAlgebra;

    fn sign_request(
        method: &str,
        uri: &str,
        query: &str,
        headers: &[(&str, &str)],
        signed: &[&str],
        body: &[u8],
        secret: &str,
        date: &str,
        region: &str,
        service: &str,
        access_key: &str,
    ) -> (String, String) {
        let payload_hash = hash_payload(body);
        let canonical = build_canonical_request(method, uri, query, headers, signed, &payload_hash);
        let canonical_hash = hash_payload(canonical.as_bytes());
        let timestamp = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("x-amz-date"))
            .map(|(_, v)| *v)
            .unwrap();
        let scope = format!("{date}/{region}/{service}/aws4_request");
        let sts = build_string_to_sign(timestamp, &scope, &canonical_hash);
        let signing_key = derive_signing_key(secret, date, region, service);
        let signature = compute_signature(&signing_key, &sts);
        let auth_header = format!(
            "AWS4-HMAC-SHA256 Credential={access_key}/{date}/{region}/{service}/aws4_request, SignedHeaders={}, Signature={signature}",
            signed.join(";")
        );
        (auth_header, signature)
    }

    fn request_context(uri: &str, headers: Vec<(String, String)>) -> RequestContext {
        RequestContext {
            method: "GET".to_owned(),
            uri: uri.to_owned(),
            query_string: String::new(),
            headers,
        }
    }

    #[tokio::test]
    async fn test_scenario_happy_path_authentication() {
        let headers = [("host", "dns.example.com"), ("x-amz-date", "20180101T000000Z")];
        let signed = ["host", "x-amz-date"];
        let (auth_header, _) = sign_request(
            "GET", "/zones", "", &headers, &signed, b"", "shh", "20180101", "us-east-1", "dns", "AKID",
        );

        let mut wire_headers: Vec<(String, String)> =
            headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        wire_headers.push(("Authorization".to_owned(), auth_header));
        let request = request_context("/zones", wire_headers);

        let provider = StaticAuthPrincipalProvider::new(vec![Principal {
            user_id: "user-1".to_owned(),
            access_key: "AKID".to_owned(),
            secret_key: "shh".to_owned(),
            groups: vec![],
        }]);

        let outcome = authenticate(&request, b"", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();

        match outcome {
            AuthenticationOutcome::Authenticated(principal) => assert_eq!(principal.access_key, "AKID"),
            other => panic!("expected Authenticated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scenario_missing_header() {
        let request = request_context("/zones", vec![]);
        let provider = StaticAuthPrincipalProvider::new(vec![]);

        let outcome = authenticate(&request, b"", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();

        assert_eq!(outcome, AuthenticationOutcome::CredentialsMissing);
    }

    #[tokio::test]
    async fn test_scenario_unparseable_header() {
        let request = request_context(
            "/zones",
            vec![("Authorization".to_owned(), "Bearer xyz".to_owned())],
        );
        let provider = StaticAuthPrincipalProvider::new(vec![]);

        let outcome = authenticate(&request, b"", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthenticationOutcome::CredentialsRejected("Authorization header could not be parsed".to_owned())
        );
    }

    #[tokio::test]
    async fn test_scenario_unknown_access_key() {
        let headers = [("host", "dns.example.com"), ("x-amz-date", "20180101T000000Z")];
        let signed = ["host", "x-amz-date"];
        let (auth_header, _) = sign_request(
            "GET", "/zones", "", &headers, &signed, b"", "shh", "20180101", "us-east-1", "dns", "AKID",
        );
        let mut wire_headers: Vec<(String, String)> =
            headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        wire_headers.push(("Authorization".to_owned(), auth_header));
        let request = request_context("/zones", wire_headers);

        let provider = StaticAuthPrincipalProvider::new(vec![]);

        let outcome = authenticate(&request, b"", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthenticationOutcome::CredentialsRejected("Account with accessKey AKID specified was not found".to_owned())
        );
    }

    #[tokio::test]
    async fn test_scenario_bad_signature_after_body_tampered() {
        let headers = [("host", "dns.example.com"), ("x-amz-date", "20180101T000000Z")];
        let signed = ["host", "x-amz-date"];
        let (auth_header, _) = sign_request(
            "GET", "/zones", "", &headers, &signed, b"original", "shh", "20180101", "us-east-1", "dns", "AKID",
        );
        let mut wire_headers: Vec<(String, String)> =
            headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        wire_headers.push(("Authorization".to_owned(), auth_header));
        let request = request_context("/zones", wire_headers);

        let provider = StaticAuthPrincipalProvider::new(vec![Principal {
            user_id: "user-1".to_owned(),
            access_key: "AKID".to_owned(),
            secret_key: "shh".to_owned(),
            groups: vec![],
        }]);

        // Body tampered after signing.
        let outcome = authenticate(&request, b"tampered", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthenticationOutcome::CredentialsRejected("Request signature could not be validated".to_owned())
        );
    }

    #[tokio::test]
    async fn test_idempotence_same_request_yields_same_outcome() {
        let headers = [("host", "dns.example.com"), ("x-amz-date", "20180101T000000Z")];
        let signed = ["host", "x-amz-date"];
        let (auth_header, _) = sign_request(
            "GET", "/zones", "", &headers, &signed, b"", "shh", "20180101", "us-east-1", "dns", "AKID",
        );
        let mut wire_headers: Vec<(String, String)> =
            headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        wire_headers.push(("Authorization".to_owned(), auth_header));
        let request = request_context("/zones", wire_headers);

        let provider = StaticAuthPrincipalProvider::new(vec![Principal {
            user_id: "user-1".to_owned(),
            access_key: "AKID".to_owned(),
            secret_key: "shh".to_owned(),
            groups: vec![],
        }]);

        let first = authenticate(&request, b"", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();
        let second = authenticate(&request, b"", &provider, &NoopCryptoAlgebra, &AuthConfig::default())
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
