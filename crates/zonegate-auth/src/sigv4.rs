//! Parsing and cryptographic primitives for AWS Signature Version 4.
//!
//! Everything in this module is synchronous and CPU-only, per the
//! concurrency model: header parsing, string-to-sign construction, and key
//! derivation are never suspension points.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::HeaderParseError;

/// The only algorithm token this implementation accepts.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

type HmacSha256 = Hmac<Sha256>;

/// The fields extracted from a well-formed `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthHeader {
    /// The claimed access key id.
    pub access_key_id: String,
    /// The `yyyymmdd` credential-scope date.
    pub date: String,
    /// The credential-scope region.
    pub region: String,
    /// The credential-scope service.
    pub service: String,
    /// The header names listed in `SignedHeaders`, in the order given.
    pub signed_headers: Vec<String>,
    /// The hex-encoded signature the client supplied.
    pub signature: String,
}

impl ParsedAuthHeader {
    /// The `date/region/service/aws4_request` credential scope string used
    /// both in the string-to-sign and in signing-key derivation.
    #[must_use]
    pub fn credential_scope(&self) -> String {
        format!("{}/{}/{}/aws4_request", self.date, self.region, self.service)
    }
}

/// Parse an `Authorization` header value of the form:
///
/// ```text
/// AWS4-HMAC-SHA256 Credential=<access>/<yyyymmdd>/<region>/<service>/aws4_request, SignedHeaders=<h1;h2;...>, Signature=<hex>
/// ```
///
/// # Errors
///
/// Returns [`HeaderParseError::MalformedHeader`] if the header does not
/// match this grammar exactly (wrong algorithm token, missing component,
/// malformed credential scope).
pub fn parse_authorization_header(header: &str) -> Result<ParsedAuthHeader, HeaderParseError> {
    let mut scheme_split = header.splitn(2, ' ');
    let algorithm = scheme_split.next().unwrap_or_default();
    let rest = scheme_split.next().ok_or(HeaderParseError::MalformedHeader)?;

    if !algorithm.eq_ignore_ascii_case(ALGORITHM) {
        return Err(HeaderParseError::MalformedHeader);
    }

    let mut credential = None;
    let mut signed_headers = None;
    let mut signature = None;

    for component in rest.split(',') {
        let component = component.trim();
        if let Some(value) = component.strip_prefix("Credential=") {
            credential = Some(value);
        } else if let Some(value) = component.strip_prefix("SignedHeaders=") {
            signed_headers = Some(value);
        } else if let Some(value) = component.strip_prefix("Signature=") {
            signature = Some(value);
        } else {
            return Err(HeaderParseError::MalformedHeader);
        }
    }

    let credential = credential.ok_or(HeaderParseError::MalformedHeader)?;
    let signed_headers = signed_headers.ok_or(HeaderParseError::MalformedHeader)?;
    let signature = signature.ok_or(HeaderParseError::MalformedHeader)?;

    let parts: Vec<&str> = credential.split('/').collect();
    if parts.len() != 5 || parts[4] != "aws4_request" {
        return Err(HeaderParseError::MalformedHeader);
    }

    let [access_key_id, date, region, service, _] = parts[..] else {
        return Err(HeaderParseError::MalformedHeader);
    };

    if access_key_id.is_empty() || date.is_empty() || region.is_empty() || service.is_empty() {
        return Err(HeaderParseError::MalformedHeader);
    }

    if signature.is_empty() || !signature.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HeaderParseError::MalformedHeader);
    }

    Ok(ParsedAuthHeader {
        access_key_id: access_key_id.to_owned(),
        date: date.to_owned(),
        region: region.to_owned(),
        service: service.to_owned(),
        signed_headers: signed_headers.split(';').map(str::to_owned).collect(),
        signature: signature.to_owned(),
    })
}

/// Hex-lowercase SHA-256 of the payload. The empty string hashes to the
/// well-known empty-body digest.
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Build the string-to-sign from the algorithm id, request timestamp,
/// credential scope, and canonical request hash.
#[must_use]
pub fn build_string_to_sign(timestamp: &str, credential_scope: &str, canonical_request_hash: &str) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts a key of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Derive the signing key by the four-step HMAC-SHA256 chain: kDate, kRegion,
/// kService, kSigning, each keyed by the previous step's output.
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Compute the hex-encoded HMAC-SHA256 signature of `data` under `signing_key`.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}
