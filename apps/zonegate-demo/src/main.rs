//! Demonstration composition root for the zonegate control-plane core.
//!
//! Wires a [`zonegate_auth::StaticAuthPrincipalProvider`], a configured
//! [`zonegate_crypto::CryptoAlgebra`], and a handful of canned
//! authentication and zone scenarios together behind a CLI entry point. It
//! exercises the library end-to-end the way a reader would run it; it does
//! not implement an HTTP server, a DNS resolver, or any other surface the
//! core's Non-goals exclude.
//!
//! # Usage
//!
//! ```text
//! LOG_LEVEL=debug cargo run -p zonegate-demo
//! ```
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `info` | Default `tracing` filter directive |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `ENCRYPT_USER_SECRETS` | `false` | Gate secret decryption during authentication |
//! | `ZONEGATE_AES_KEY_HEX` | *(unset)* | 64-hex-char AES-256 key; selects `AesGcm` when present |

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zonegate_auth::canonical::build_canonical_request;
use zonegate_auth::sigv4::{build_string_to_sign, compute_signature, derive_signing_key, hash_payload};
use zonegate_auth::{AuthConfig, AuthenticationOutcome, Principal, RequestContext, StaticAuthPrincipalProvider, authenticate};
use zonegate_core::CoreConfig;
use zonegate_zone::{AccessLevel, NewZone, RecordType, Zone, ZoneAclRule, ZoneConfig, ptr_is_in_zone};

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level).with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

/// Sign a canned request the same way a well-behaved client would, so the
/// demo can show [`authenticate`] accepting it.
fn sign_demo_request(access_key: &str, secret_key: &str) -> (String, Vec<(String, String)>) {
    let headers = [("host", "dns.example.com"), ("x-amz-date", "20180101T000000Z")];
    let signed = ["host", "x-amz-date"];
    let payload_hash = hash_payload(b"");
    let canonical = build_canonical_request("GET", "/zones", "", &headers, &signed, &payload_hash);
    let canonical_hash = hash_payload(canonical.as_bytes());
    let scope = "20180101/us-east-1/dns/aws4_request";
    let string_to_sign = build_string_to_sign("20180101T000000Z", scope, &canonical_hash);
    let signing_key = derive_signing_key(secret_key, "20180101", "us-east-1", "dns");
    let signature = compute_signature(&signing_key, &string_to_sign);

    let auth_header = format!(
        "AWS4-HMAC-SHA256 Credential={access_key}/{scope}, SignedHeaders={}, Signature={signature}",
        signed.join(";")
    );

    let mut wire_headers: Vec<(String, String)> =
        headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    wire_headers.push(("Authorization".to_owned(), auth_header));
    (signature, wire_headers)
}

async fn run_authentication_demo(auth_config: &AuthConfig) -> Result<()> {
    let principal = Principal {
        user_id: "user-1".to_owned(),
        access_key: "AKID".to_owned(),
        secret_key: "shh-its-a-secret".to_owned(),
        groups: vec!["admins".to_owned()],
    };
    let provider = StaticAuthPrincipalProvider::new(vec![principal]);
    let crypto = auth_config.crypto.build()?;

    let (_signature, headers) = sign_demo_request("AKID", "shh-its-a-secret");
    let request = RequestContext { method: "GET".to_owned(), uri: "/zones".to_owned(), query_string: String::new(), headers };

    let outcome = authenticate(&request, b"", &provider, crypto.as_ref(), auth_config).await?;
    match outcome {
        AuthenticationOutcome::Authenticated(p) => info!(access_key = %p.access_key, "request authenticated"),
        AuthenticationOutcome::CredentialsMissing => info!("credentials missing"),
        AuthenticationOutcome::CredentialsRejected(reason) => info!(%reason, "credentials rejected"),
    }

    let tampered_outcome = authenticate(&request, b"tampered-body", &provider, crypto.as_ref(), auth_config).await?;
    info!(outcome = ?tampered_outcome, "same request, tampered body");

    Ok(())
}

fn run_zone_demo(zone_config: &ZoneConfig) -> Result<()> {
    let crypto = zone_config.crypto.build()?;

    let connection = zonegate_zone::ZoneConnection::new(
        "primary",
        "tsig-key.",
        b"tsig-secret".to_vec(),
        "ns1.example.com:53",
    )
    .map_err(|errors| anyhow::anyhow!("connection validation failed: {errors:?}"))?;
    let encrypted = connection.encrypted(crypto.as_ref())?;
    info!(name = %encrypted.name, "zone connection encrypted for at-rest storage");

    let zone = Zone::build(
        NewZone {
            name: "example.com.".to_owned(),
            email: "admin@example.com".to_owned(),
            admin_group_id: "group-1".to_owned(),
            connection: Some(encrypted),
            ..Default::default()
        },
        Utc::now(),
    )
    .map_err(|errors| anyhow::anyhow!("zone validation failed: {errors:?}"))?;
    info!(zone_name = %zone.name(), zone_id = %zone.id(), "zone constructed");

    let rule = ZoneAclRule::new("group-a", AccessLevel::Write)
        .map_err(|e| anyhow::anyhow!("acl rule validation failed: {e}"))?;
    let with_acl = zone.add_acl_rule(rule);
    info!(rule_count = with_acl.acl().rules().len(), "acl rule added (copy-on-write)");

    let reverse_zone = Zone::build(
        NewZone {
            name: "0/26.2.0.192.in-addr.arpa.".to_owned(),
            email: "admin@example.com".to_owned(),
            admin_group_id: "group-1".to_owned(),
            ..Default::default()
        },
        Utc::now(),
    )
    .map_err(|errors| anyhow::anyhow!("reverse zone validation failed: {errors:?}"))?;

    match ptr_is_in_zone(&reverse_zone, "25", RecordType::Ptr) {
        Ok(()) => info!(record = "25", zone = %reverse_zone.name(), "PTR record belongs in zone"),
        Err(e) => info!(error = %e, "PTR record rejected"),
    }

    match ptr_is_in_zone(&reverse_zone, "25.200", RecordType::Ptr) {
        Ok(()) => info!("unexpectedly accepted an out-of-zone PTR"),
        Err(e) => info!(error = %e, "PTR record correctly rejected: escapes zone"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let core_config = CoreConfig::from_env();
    init_tracing(&core_config.log_level)?;

    let auth_config = AuthConfig::from_env();
    let zone_config = ZoneConfig::from_env();

    info!("running zonegate authentication demo");
    run_authentication_demo(&auth_config).await?;

    info!("running zonegate zone model demo");
    run_zone_demo(&zone_config)?;

    Ok(())
}
