//! Generic, reusable field validators.
//!
//! Each function here checks exactly one field and returns `Err(message)` on
//! failure; none of them short-circuit each other. The zone builder in
//! [`crate::zone`] is what calls every validator unconditionally and
//! accumulates the results — these functions are deliberately ignorant of
//! that accumulation so they stay simple and independently testable.

use std::net::Ipv4Addr;

const MIN_ZONE_NAME_LEN: usize = 2;
const MAX_ZONE_NAME_LEN: usize = 255;

/// Validate a fully-qualified zone name: length bounds, trailing dot, and
/// RFC 1035 LDH labels.
///
/// The leading label of an IPv4 reverse zone is an exception: RFC
/// 2317 classless in-addr.arpa. delegation writes it `<octet>/<prefix>`
/// (e.g. `0/26.2.0.192.in-addr.arpa.`), which is not itself an LDH label.
/// That one label is checked by [`validate_classless_delegation_label`]
/// instead of the ordinary LDH rule.
pub fn validate_zone_name(name: &str) -> Result<(), String> {
    if name.len() < MIN_ZONE_NAME_LEN || name.len() > MAX_ZONE_NAME_LEN {
        return Err(format!(
            "must be between {MIN_ZONE_NAME_LEN} and {MAX_ZONE_NAME_LEN} characters"
        ));
    }
    if !name.ends_with('.') {
        return Err("must end with a trailing dot".to_owned());
    }

    let without_trailing_dot = &name[..name.len() - 1];
    let is_ipv4_reverse = name.ends_with("in-addr.arpa.");
    for (index, label) in without_trailing_dot.split('.').enumerate() {
        if index == 0 && is_ipv4_reverse && label.contains('/') {
            validate_classless_delegation_label(label).map_err(|e| format!("label '{label}' {e}"))?;
            continue;
        }
        validate_ldh_label(label).map_err(|e| format!("label '{label}' {e}"))?;
    }
    Ok(())
}

fn validate_ldh_label(label: &str) -> Result<(), String> {
    if label.is_empty() || label.len() > 63 {
        return Err("must be 1 to 63 characters".to_owned());
    }
    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err("must contain only letters, digits, and hyphens".to_owned());
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err("must not start or end with a hyphen".to_owned());
    }
    Ok(())
}

/// Validate a classless in-addr.arpa. delegation label: `<octet>/<prefix>`,
/// octet `0..=255`, prefix `0..=32`.
fn validate_classless_delegation_label(label: &str) -> Result<(), String> {
    let (octet, prefix) = label
        .split_once('/')
        .ok_or_else(|| "must be of the form octet/prefix".to_owned())?;
    octet
        .parse::<u8>()
        .map_err(|_| "octet must be a number from 0 to 255".to_owned())?;
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| "prefix must be a number from 0 to 32".to_owned())?;
    if prefix > 32 {
        return Err("prefix must be a number from 0 to 32".to_owned());
    }
    Ok(())
}

/// Validate an RFC-5322-lite email address: `local@domain`, domain has at
/// least one dot.
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("must be of the form local@domain".to_owned());
    };
    if local.is_empty() {
        return Err("local part must not be empty".to_owned());
    }
    if domain.is_empty() || !domain.contains('.') {
        return Err("domain part must contain at least one dot".to_owned());
    }
    if domain.contains('@') {
        return Err("must contain exactly one '@'".to_owned());
    }
    Ok(())
}

/// Validate a non-empty, caller-opaque identifier (used for
/// `adminGroupId`, `connection.keyName`).
pub fn validate_non_empty(value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err("must not be empty".to_owned())
    } else {
        Ok(())
    }
}

/// Validate a connection/zone name: 1 to 255 characters.
pub fn validate_name_length(value: &str) -> Result<(), String> {
    if value.is_empty() || value.len() > 255 {
        Err("must be between 1 and 255 characters".to_owned())
    } else {
        Ok(())
    }
}

/// Validate a hostname per RFC 1035 LDH labels (no trailing-dot requirement,
/// unlike a zone name).
pub fn validate_hostname(host: &str) -> Result<(), String> {
    if host.is_empty() || host.len() > 255 {
        return Err("must be between 1 and 255 characters".to_owned());
    }
    let trimmed = host.strip_suffix('.').unwrap_or(host);
    for label in trimmed.split('.') {
        validate_ldh_label(label).map_err(|e| format!("label '{label}' {e}"))?;
    }
    Ok(())
}

/// Validate that `host` is either a syntactically valid hostname or a valid
/// IPv4 literal.
pub fn validate_host_or_ipv4(host: &str) -> Result<(), String> {
    if host.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }
    validate_hostname(host)
}

/// Validate `host[:port]`: host is a hostname or IPv4 literal; port, if
/// present, is in `1..=65535`.
pub fn validate_primary_server(value: &str) -> Result<(), String> {
    match value.rsplit_once(':') {
        None => validate_host_or_ipv4(value),
        Some((host, port_str)) => {
            validate_host_or_ipv4(host)?;
            let port: u32 = port_str
                .parse()
                .map_err(|_| format!("port '{port_str}' is not a number"))?;
            if port == 0 || port > 65535 {
                return Err(format!("port {port} must be between 1 and 65535"));
            }
            Ok(())
        }
    }
}
