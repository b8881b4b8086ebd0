//! Zone/ZoneConnection/ZoneACL domain model and reverse-zone arithmetic for
//! the zonegate control plane.
//!
//! This crate depends on [`zonegate_crypto`] for TSIG key handling and on
//! generic field validators it owns itself, matching the core's dependency
//! order: the crypto algebra is a pure leaf, the zone model builds on it,
//! and the reverse-zone helpers build on the zone model. It has no
//! dependency on [`zonegate_auth`](../zonegate_auth/index.html).
//!
//! # Modules
//!
//! - [`validators`] — generic, reusable field validators
//! - [`connection`] — [`ZoneConnection`] and its TSIG key lifecycle
//! - [`acl`] — [`ZoneAcl`], [`ZoneAclRule`], [`AccessLevel`]
//! - [`zone`] — [`Zone`], [`ZoneStatus`], [`NewZone`]
//! - [`reverse`] — PTR ↔ IP conversion, CIDR containment, `ptr_is_in_zone`
//! - [`config`] — [`ZoneConfig`], loaded once at composition time
//! - [`error`] — [`ValidationError`] and [`InvalidRequest`]

pub mod acl;
pub mod config;
pub mod connection;
pub mod error;
pub mod reverse;
pub mod validators;
pub mod zone;

pub use acl::{AccessLevel, ZoneAcl, ZoneAclRule};
pub use config::ZoneConfig;
pub use connection::ZoneConnection;
pub use error::{InvalidRequest, ValidationError};
pub use reverse::{RecordType, cidr_contains, convert_ptr_to_ipv4, convert_ptr_to_ipv6, ipv6_ptr_is_valid, ptr_is_in_zone, zone_to_cidr};
pub use zone::{NewZone, Zone, ZoneStatus};
