//! AWS-SigV4-style request authentication for the zonegate control plane.
//!
//! Given an incoming HTTP request descriptor and its materialized body, this
//! crate resolves the claimed access key, looks up the owning principal
//! through an injected [`AuthPrincipalProvider`], and validates the request's
//! HMAC signature over the AWS Signature V4 canonical request — producing an
//! [`AuthenticationOutcome`] rather than throwing, because "missing
//! credentials" and "rejected credentials" are expected, user-visible
//! results, not exceptions.
//!
//! # Modules
//!
//! - [`canonical`] — canonical request construction (method, URI, query, headers)
//! - [`sigv4`] — `Authorization` header parsing and HMAC-SHA256 key derivation
//! - [`principal`] — [`Principal`] and the [`AuthPrincipalProvider`] trait
//! - [`request`] — [`RequestContext`], the transport-neutral request view
//! - [`config`] — [`AuthConfig`], loaded once at composition time
//! - [`outcome`] — [`AuthenticationOutcome`] and [`authenticate`]
//! - [`error`] — internal header-parse failure taxonomy

pub mod canonical;
pub mod config;
pub mod error;
mod outcome;
pub mod principal;
pub mod request;
pub mod sigv4;

pub use config::AuthConfig;
pub use outcome::{AuthenticationOutcome, authenticate};
pub use principal::{AuthPrincipalProvider, Principal, StaticAuthPrincipalProvider};
pub use request::RequestContext;
