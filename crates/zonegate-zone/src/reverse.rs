//! Reverse-zone arithmetic: PTR-name ↔ IP address conversion, CIDR
//! containment, and the `ptrIsInZone` membership decision.
//!
//! Every public function here is pure and synchronous. Per the spec's open
//! questions, arithmetic/parse faults encountered while converting a
//! user-supplied record name are swallowed and re-expressed as the single
//! [`InvalidRequest`] shape — never propagated as an infrastructural fault —
//! because a malformed PTR name is an expected, user-caused condition, not a
//! programmer error.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::InvalidRequest;
use crate::zone::Zone;

const IPV4_REVERSE_SUFFIX: &str = "in-addr.arpa.";
const IPV6_REVERSE_SUFFIX: &str = "ip6.arpa.";

/// The DNS record type of the record being validated against a zone.
///
/// Only [`RecordType::Ptr`] is meaningfully checked by
/// [`ptr_is_in_zone`]; every other type is out of scope for reverse-zone
/// membership and is always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// `A` record.
    A,
    /// `AAAA` record.
    Aaaa,
    /// `CNAME` record.
    Cname,
    /// `MX` record.
    Mx,
    /// `NS` record.
    Ns,
    /// `PTR` record — the only type reverse-zone membership constrains.
    Ptr,
    /// `SOA` record.
    Soa,
    /// `SRV` record.
    Srv,
    /// `TXT` record.
    Txt,
}

static IPV6_PTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[0-9a-f]\.){32}ip6\.arpa\.$").expect("IPv6 PTR pattern is a fixed, valid regex")
});

fn strip_suffix<'a>(name: &'a str, suffix: &str) -> Result<&'a str, InvalidRequest> {
    name.strip_suffix(suffix)
        .ok_or_else(|| InvalidRequest(format!("zone name {name} does not end in {suffix}")))
}

fn reversed_labels(name: &str) -> Vec<&str> {
    let mut labels: Vec<&str> = name.split('.').filter(|label| !label.is_empty()).collect();
    labels.reverse();
    labels
}

/// Reconstruct the full dotted-quad IPv4 address a PTR record name denotes
/// inside an IPv4 reverse `zone`.
///
/// # Errors
///
/// Returns [`InvalidRequest`] if `zone_name` does not end in
/// `in-addr.arpa.`. Malformed results (too few/many octets, non-numeric
/// labels) are not rejected here — they surface later as a parse failure
/// when the caller tries to interpret the result as an [`Ipv4Addr`], per
/// the spec's leniency requirement.
pub fn convert_ptr_to_ipv4(zone_name: &str, record_name: &str) -> Result<String, InvalidRequest> {
    let body = strip_suffix(zone_name, IPV4_REVERSE_SUFFIX)?;
    let mut zone_octets = reversed_labels(body);
    if zone_name.contains('/') {
        zone_octets.pop();
    }
    let record_octets = reversed_labels(record_name);

    let mut octets = zone_octets;
    octets.extend(record_octets);
    Ok(octets.join("."))
}

/// Derive the CIDR block an IPv4 reverse zone name encodes.
///
/// Classful zones (no `/`) pad with `.0` to four octets and imply `/8`,
/// `/16`, or `/24` from 1, 2, or 3 extracted octets respectively. Classless
/// delegation zones (`0/26.2.0.192.in-addr.arpa.`) carry the prefix
/// explicitly on the lowest octet; the base address is right-padded with
/// `.0` to four octets before combining with that prefix.
///
/// # Errors
///
/// Returns [`InvalidRequest`] if `zone_name` does not end in
/// `in-addr.arpa.`, extracts zero or more than three octets with no
/// explicit prefix, or the explicit prefix/base octet cannot be parsed.
pub fn zone_to_cidr(zone_name: &str) -> Result<(Ipv4Addr, u8), InvalidRequest> {
    let body = strip_suffix(zone_name, IPV4_REVERSE_SUFFIX)?;
    let zone_octets = reversed_labels(body);
    let invalid = || InvalidRequest(format!("zone name {zone_name} does not encode a valid IPv4 CIDR block"));

    if zone_name.contains('/') {
        let (last, rest) = zone_octets.split_last().ok_or_else(invalid)?;
        let (base, prefix_str) = last.split_once('/').ok_or_else(invalid)?;
        let prefix: u8 = prefix_str.parse().map_err(|_| invalid())?;
        let mut octets: Vec<&str> = rest.to_vec();
        octets.push(base);
        while octets.len() < 4 {
            octets.push("0");
        }
        let address: Ipv4Addr = octets.join(".").parse().map_err(|_| invalid())?;
        return Ok((address, prefix));
    }

    let prefix = match zone_octets.len() {
        1 => 8,
        2 => 16,
        3 => 24,
        _ => return Err(invalid()),
    };
    let mut octets = zone_octets;
    while octets.len() < 4 {
        octets.push("0");
    }
    let address: Ipv4Addr = octets.join(".").parse().map_err(|_| invalid())?;
    Ok((address, prefix))
}

/// Whether `address` falls within `network/prefix`.
#[must_use]
pub fn cidr_contains(network: Ipv4Addr, prefix: u8, address: Ipv4Addr) -> bool {
    if prefix == 0 {
        return true;
    }
    if prefix > 32 {
        return false;
    }
    let mask = u32::MAX.checked_shl(u32::from(32 - prefix)).unwrap_or(0);
    (u32::from(network) & mask) == (u32::from(address) & mask)
}

/// Reconstruct the IPv6 literal a PTR record name denotes inside an IPv6
/// reverse `zone`, in colon-separated 4-nibble-block form.
///
/// # Errors
///
/// Returns [`InvalidRequest`] if `zone_name` does not end in `ip6.arpa.`.
/// Does not itself validate nibble count or character set — callers that
/// need a strict check use [`ipv6_ptr_is_valid`].
pub fn convert_ptr_to_ipv6(zone_name: &str, record_name: &str) -> Result<String, InvalidRequest> {
    let body = strip_suffix(zone_name, IPV6_REVERSE_SUFFIX)?;
    let mut nibbles = reversed_labels(body);
    nibbles.extend(reversed_labels(record_name));

    let hex: String = nibbles.concat();
    let grouped: Vec<String> = hex.as_bytes().chunks(4).map(|chunk| String::from_utf8_lossy(chunk).into_owned()).collect();
    Ok(grouped.join(":"))
}

/// Whether `record_name + "." + zone_name` is a syntactically valid,
/// fully-qualified IPv6 PTR name: exactly 32 single-hex-digit labels
/// followed by `ip6.arpa.`, case-insensitive.
#[must_use]
pub fn ipv6_ptr_is_valid(record_name: &str, zone_name: &str) -> bool {
    let candidate = format!("{record_name}.{zone_name}");
    IPV6_PTR_PATTERN.is_match(&candidate)
}

/// Decide whether `record_name` of type `record_type` belongs inside `zone`.
///
/// Non-`PTR` records are always accepted: reverse-zone membership is a
/// `PTR`-specific concern. Any arithmetic or parse fault encountered while
/// converting or containing the record name is swallowed and reported as
/// the same [`InvalidRequest`], per the spec's leniency requirement — this
/// function never propagates an infrastructural error.
///
/// # Errors
///
/// Returns [`InvalidRequest`] when `record_type` is `PTR` and the record
/// does not belong in `zone`: the zone is neither a recognized IPv4 nor
/// IPv6 reverse zone, the reconstructed address fails to parse, or the
/// address falls outside the zone's CIDR block / nibble pattern.
pub fn ptr_is_in_zone(zone: &Zone, record_name: &str, record_type: RecordType) -> Result<(), InvalidRequest> {
    if record_type != RecordType::Ptr {
        return Ok(());
    }

    let not_valid = || InvalidRequest::not_a_valid_ip(record_name, zone.name());

    if zone.is_ipv4() {
        let contained = (|| -> Option<bool> {
            let (network, prefix) = zone_to_cidr(zone.name()).ok()?;
            let address_str = convert_ptr_to_ipv4(zone.name(), record_name).ok()?;
            let address: Ipv4Addr = address_str.parse().ok()?;
            Some(cidr_contains(network, prefix, address))
        })();
        return if contained == Some(true) { Ok(()) } else { Err(not_valid()) };
    }

    if zone.is_ipv6() {
        return if ipv6_ptr_is_valid(record_name, zone.name()) { Ok(()) } else { Err(not_valid()) };
    }

    Err(not_valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::NewZone;
    use chrono::Utc;

    fn zone_named(name: &str) -> Zone {
        Zone::build(
            NewZone {
                name: name.to_owned(),
                email: "admin@example.com".to_owned(),
                admin_group_id: "group-1".to_owned(),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_ipv4_ptr_inside_classless_delegation() {
        let zone = zone_named("0/26.2.0.192.in-addr.arpa.");
        assert_eq!(convert_ptr_to_ipv4(zone.name(), "25").unwrap(), "192.0.2.25");
        assert!(ptr_is_in_zone(&zone, "25", RecordType::Ptr).is_ok());
    }

    #[test]
    fn test_scenario_ipv4_ptr_outside_zone() {
        let zone = zone_named("2.0.192.in-addr.arpa.");
        assert!(ptr_is_in_zone(&zone, "25.3", RecordType::Ptr).is_err());
    }

    #[test]
    fn test_scenario_ipv6_ptr_valid() {
        let zone = zone_named("0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa.");
        let record = "1.2.3.4.5.6.7.8";
        assert!(ptr_is_in_zone(&zone, record, RecordType::Ptr).is_ok());
        assert!(ipv6_ptr_is_valid(record, zone.name()));
    }

    #[test]
    fn test_non_ptr_record_type_always_ok() {
        let zone = zone_named("2.0.192.in-addr.arpa.");
        assert!(ptr_is_in_zone(&zone, "not-an-ip-at-all", RecordType::A).is_ok());
    }

    #[test]
    fn test_forward_zone_ptr_is_always_invalid_request() {
        let zone = zone_named("example.com.");
        assert!(ptr_is_in_zone(&zone, "1", RecordType::Ptr).is_err());
    }

    #[test]
    fn test_classful_8_bit_zone_to_cidr() {
        let (network, prefix) = zone_to_cidr("10.in-addr.arpa.").unwrap();
        assert_eq!(network, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(prefix, 8);
    }

    #[test]
    fn test_classful_16_bit_zone_to_cidr() {
        let (network, prefix) = zone_to_cidr("0.10.in-addr.arpa.").unwrap();
        assert_eq!(network, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(prefix, 16);
    }

    #[test]
    fn test_classless_delegation_zone_to_cidr() {
        let (network, prefix) = zone_to_cidr("0/26.2.0.192.in-addr.arpa.").unwrap();
        assert_eq!(network, Ipv4Addr::new(192, 0, 2, 0));
        assert_eq!(prefix, 26);
    }

    #[test]
    fn test_zone_to_cidr_rejects_zero_octets() {
        assert!(zone_to_cidr("in-addr.arpa.").is_err());
    }

    #[test]
    fn test_zone_to_cidr_rejects_more_than_three_octets_without_prefix() {
        assert!(zone_to_cidr("4.3.2.1.in-addr.arpa.").is_err());
    }

    #[test]
    fn test_cidr_contains_basic_containment() {
        let network = Ipv4Addr::new(192, 0, 2, 0);
        assert!(cidr_contains(network, 24, Ipv4Addr::new(192, 0, 2, 200)));
        assert!(!cidr_contains(network, 24, Ipv4Addr::new(192, 0, 3, 1)));
    }

    #[test]
    fn test_cidr_contains_slash_zero_matches_everything() {
        assert!(cidr_contains(Ipv4Addr::new(0, 0, 0, 0), 0, Ipv4Addr::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_convert_ptr_to_ipv6_groups_into_colon_blocks() {
        let zone_name = "0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa.";
        let address = convert_ptr_to_ipv6(zone_name, "1.2.3.4.5.6.7.8").unwrap();
        assert_eq!(address, "2001:0db8:0000:0000:0000:0000:8765:4321");
        assert_eq!(address.split(':').count(), 8);
    }

    #[test]
    fn test_ipv6_ptr_regex_is_case_insensitive() {
        let zone_name = "0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.B.D.0.1.0.0.2.ip6.arpa.";
        let record = "1.2.3.4.5.6.7.8";
        assert!(ipv6_ptr_is_valid(record, zone_name));
    }
}
