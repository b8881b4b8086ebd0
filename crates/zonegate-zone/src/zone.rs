//! [`Zone`]: the authoritative-zone aggregate and its validating builder.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::acl::{AccessLevel, ZoneAcl, ZoneAclRule};
use crate::connection::ZoneConnection;
use crate::error::ValidationError;
use crate::validators::{validate_email, validate_non_empty, validate_zone_name};

const IPV4_REVERSE_SUFFIX: &str = "in-addr.arpa.";
const IPV6_REVERSE_SUFFIX: &str = "ip6.arpa.";

/// Lifecycle state of a [`Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneStatus {
    /// Serving traffic normally.
    Active,
    /// Soft-deleted; no longer served.
    Deleted,
    /// A change is queued for the backend nameserver.
    PendingUpdate,
    /// A deletion is queued for the backend nameserver.
    PendingDelete,
    /// An AXFR/IXFR sync against the backend is in flight.
    Syncing,
}

/// Raw, unvalidated fields for constructing a [`Zone`]. Every field is
/// checked independently by [`Zone::build`]; none of the checks
/// short-circuit each other.
#[derive(Debug, Clone, Default)]
pub struct NewZone {
    /// Fully qualified zone name, trailing-dot terminated.
    pub name: String,
    /// Contact address for the zone administrator.
    pub email: String,
    /// Opaque id of the group administering this zone.
    pub admin_group_id: String,
    /// TSIG connection used to sign DNS UPDATE messages, if any.
    pub connection: Option<ZoneConnection>,
    /// TSIG connection used to sign AXFR/IXFR transfers, if any.
    pub transfer_connection: Option<ZoneConnection>,
    /// Raw `(subject_id, access_level)` ACL entries.
    pub acl: Vec<(String, AccessLevel)>,
    /// Ownership handle; defaults to `"system"` when not supplied.
    pub account: Option<String>,
    /// When `true`, ACL rules may grant non-owner access.
    pub shared: bool,
}

/// The authoritative-zone aggregate every subsequent control-plane
/// operation mutates.
///
/// `Zone` is immutable after construction: `addACLRule`/`deleteACLRule` are
/// the only mutation methods, and both return a new value rather than
/// mutating in place. The [`Zone::build`] function is the only constructor;
/// it accumulates every field's validation failures rather than
/// short-circuiting on the first one, so a caller can display all problems
/// at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    id: Uuid,
    name: String,
    email: String,
    status: ZoneStatus,
    created: DateTime<Utc>,
    updated: Option<DateTime<Utc>>,
    latest_sync: Option<DateTime<Utc>>,
    connection: Option<ZoneConnection>,
    transfer_connection: Option<ZoneConnection>,
    account: String,
    admin_group_id: String,
    shared: bool,
    acl: ZoneAcl,
}

impl Zone {
    /// Validate `raw` and construct a `Zone` in [`ZoneStatus::Active`] with
    /// `created` set to `now`.
    ///
    /// # Errors
    ///
    /// Returns every accumulated field-level [`ValidationError`] together:
    /// name, email, adminGroupId, connection (if present), transfer
    /// connection (if present), and every ACL rule are all checked
    /// regardless of whether an earlier field already failed.
    pub fn build(raw: NewZone, now: DateTime<Utc>) -> Result<Self, Vec<ValidationError>> {
        debug!(zone_name = %raw.name, "validating zone");
        let mut errors = Vec::new();

        if let Err(msg) = validate_zone_name(&raw.name) {
            errors.push(ValidationError::new("name", msg));
        }
        if let Err(msg) = validate_email(&raw.email) {
            errors.push(ValidationError::new("email", msg));
        }
        if let Err(msg) = validate_non_empty(&raw.admin_group_id) {
            errors.push(ValidationError::new("adminGroupId", msg));
        }

        let acl = match ZoneAcl::build(&raw.acl) {
            Ok(acl) => Some(acl),
            Err(field_errors) => {
                errors.extend(field_errors);
                None
            }
        };

        // connection/transfer_connection were already validated by
        // ZoneConnection::new when the caller constructed them; nothing
        // further to check here. They are included in NewZone as
        // Option<ZoneConnection> rather than raw fields precisely so that
        // validation happens once, at the connection's own construction
        // site, per the spec's "each connection present independently
        // validates" invariant.

        let Some(acl) = acl else {
            warn!(zone_name = %raw.name, error_count = errors.len(), "zone validation failed");
            return Err(errors);
        };
        if !errors.is_empty() {
            warn!(zone_name = %raw.name, error_count = errors.len(), "zone validation failed");
            return Err(errors);
        }

        debug!(zone_name = %raw.name, "zone validated");
        Ok(Self {
            id: Uuid::new_v4(),
            name: raw.name,
            email: raw.email,
            status: ZoneStatus::Active,
            created: now,
            updated: None,
            latest_sync: None,
            connection: raw.connection,
            transfer_connection: raw.transfer_connection,
            account: raw.account.unwrap_or_else(|| "system".to_owned()),
            admin_group_id: raw.admin_group_id,
            shared: raw.shared,
            acl,
        })
    }

    /// Opaque identifier, assigned at construction and never reassigned.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Fully qualified zone name, trailing-dot terminated.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address for the zone administrator.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> ZoneStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Last-updated timestamp, if the zone has ever been updated.
    #[must_use]
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    /// Timestamp of the most recent successful AXFR/IXFR sync, if any.
    #[must_use]
    pub fn latest_sync(&self) -> Option<DateTime<Utc>> {
        self.latest_sync
    }

    /// The DNS-UPDATE TSIG connection, if configured.
    #[must_use]
    pub fn connection(&self) -> Option<&ZoneConnection> {
        self.connection.as_ref()
    }

    /// The AXFR/IXFR transfer TSIG connection, if configured.
    #[must_use]
    pub fn transfer_connection(&self) -> Option<&ZoneConnection> {
        self.transfer_connection.as_ref()
    }

    /// Ownership handle; `"system"` unless set otherwise at construction.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Opaque id of the group administering this zone.
    #[must_use]
    pub fn admin_group_id(&self) -> &str {
        &self.admin_group_id
    }

    /// Whether ACL rules may grant non-owner access.
    #[must_use]
    pub fn shared(&self) -> bool {
        self.shared
    }

    /// The zone's current ACL.
    #[must_use]
    pub fn acl(&self) -> &ZoneAcl {
        &self.acl
    }

    /// `true` when `name` ends in `in-addr.arpa.`.
    #[must_use]
    pub fn is_ipv4(&self) -> bool {
        self.name.ends_with(IPV4_REVERSE_SUFFIX)
    }

    /// `true` when `name` ends in `ip6.arpa.`.
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        self.name.ends_with(IPV6_REVERSE_SUFFIX)
    }

    /// `true` when this zone is either an IPv4 or IPv6 reverse zone.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.is_ipv4() || self.is_ipv6()
    }

    /// Return a new `Zone` with `rule` added to the ACL. Copy-on-write: the
    /// receiver is unchanged, and a status of [`ZoneStatus::PendingUpdate`]
    /// is not implied here — callers that need to mark the zone for a
    /// backend sync do so explicitly via [`Zone::with_status`].
    #[must_use]
    pub fn add_acl_rule(&self, rule: ZoneAclRule) -> Self {
        Self { acl: self.acl.add_rule(rule), ..self.clone() }
    }

    /// Return a new `Zone` with `rule` removed from the ACL.
    #[must_use]
    pub fn delete_acl_rule(&self, rule: &ZoneAclRule) -> Self {
        Self { acl: self.acl.delete_rule(rule), ..self.clone() }
    }

    /// Return a new `Zone` with `status` set and `updated` stamped to `now`.
    #[must_use]
    pub fn with_status(&self, status: ZoneStatus, now: DateTime<Utc>) -> Self {
        Self { status, updated: Some(now), ..self.clone() }
    }

    /// Return a new `Zone` with `latest_sync` stamped to `now`.
    #[must_use]
    pub fn with_latest_sync(&self, now: DateTime<Utc>) -> Self {
        Self { latest_sync: Some(now), ..self.clone() }
    }
}
