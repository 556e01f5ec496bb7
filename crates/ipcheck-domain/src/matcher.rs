use crate::cidr::{parse_address, parse_network};
use crate::model::{NetworkRange, priority_order};
use ipcheck_types::{AccessDecision, AllowBasis, DenyReason};

/// Decide whether `address` falls inside one of the active `ranges`.
///
/// Ranges are tried in ascending sequence order (ties by id, then input order)
/// and the first containing range wins. A range whose CIDR no longer parses is
/// skipped so that the remaining ranges are still evaluated. An address of one
/// family never matches a network of the other.
///
/// Never panics: empty or malformed addresses yield `UnresolvableAddress`.
pub fn is_member(address: &str, ranges: &[NetworkRange]) -> AccessDecision {
    let Some(ip) = parse_address(address) else {
        let detail = if address.trim().is_empty() {
            "no source address".to_string()
        } else {
            format!("invalid IP address format: {}", address.trim())
        };
        return AccessDecision::deny(DenyReason::UnresolvableAddress, detail);
    };

    let mut active: Vec<&NetworkRange> = ranges.iter().filter(|r| r.active).collect();
    if active.is_empty() {
        return AccessDecision::deny(DenyReason::NoActiveRanges, "no active network ranges");
    }
    active.sort_by(|a, b| priority_order(a, b));

    for range in active {
        let network = match parse_network(&range.cidr) {
            Ok(n) => n,
            Err(err) => {
                tracing::warn!(
                    range_id = range.id.0,
                    cidr = %range.cidr,
                    error = %err,
                    "skipping malformed network range"
                );
                continue;
            }
        };

        if network.contains(&ip) {
            return AccessDecision::allow(AllowBasis::Matched {
                range_id: range.id.0,
                range_name: range.name.clone(),
                cidr: range.cidr.trim().to_string(),
            });
        }
    }

    AccessDecision::deny(
        DenyReason::AddressNotMember,
        format!("{ip} is not inside any active network range"),
    )
}
