//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Range membership against generated networks
//! - Evaluation order and determinism
//! - Write-time overlap detection

use crate::cidr::{overlaps, parse_network};
use crate::matcher::is_member;
use crate::model::{Actor, NetworkRange};
use crate::policy::{PolicyConfig, PolicyResolver};
use crate::registry::validate_range;
use crate::test_support::{directory, enabled_location, range};
use ipcheck_types::{AccessDecision, Action, AllowBasis, DenyReason};
use ipnet::{IpNet, Ipv4Net};
use proptest::prelude::*;
use std::net::{IpAddr, Ipv4Addr};

// ============================================================================
// Strategies
// ============================================================================

/// A canonical IPv4 network (host bits cleared).
fn arb_v4_net() -> impl Strategy<Value = Ipv4Net> {
    (any::<u32>(), 0u8..=32).prop_map(|(bits, prefix)| {
        Ipv4Net::new(Ipv4Addr::from(bits), prefix)
            .expect("prefix within 0..=32")
            .trunc()
    })
}

fn arb_v4_addr() -> impl Strategy<Value = Ipv4Addr> {
    any::<u32>().prop_map(Ipv4Addr::from)
}

/// Disjoint /24 blocks of the form 10.0.o.0/24.
fn arb_disjoint_ranges() -> impl Strategy<Value = Vec<NetworkRange>> {
    prop::collection::btree_set(0u8..=255, 1..8).prop_map(|octets| {
        octets
            .into_iter()
            .enumerate()
            .map(|(i, o)| range(i as u64 + 1, 1, &format!("10.0.{o}.0/24")))
            .collect()
    })
}

/// Strings that are not IP literals.
fn arb_garbage_address() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("256.256.256.256".to_string()),
        Just("10.0.0.0/8".to_string()),
        prop::string::string_regex("[a-z_]{1,16}").expect("regex"),
        prop::string::string_regex("[0-9]{1,3}(\\.[0-9]{1,3}){0,2}").expect("regex"),
    ]
}

fn matched_id(decision: &AccessDecision) -> Option<u64> {
    match decision {
        AccessDecision::Allow {
            basis: AllowBasis::Matched { range_id, .. },
        } => Some(*range_id),
        _ => None,
    }
}

// ============================================================================
// Property tests: membership
// ============================================================================

proptest! {
    /// An address is allowed iff one of the generated blocks contains it.
    #[test]
    fn membership_iff_contained(ranges in arb_disjoint_ranges(), addr in arb_v4_addr()) {
        let decision = is_member(&addr.to_string(), &ranges);
        let ip = IpAddr::V4(addr);
        let contained = ranges.iter().any(|r| {
            r.cidr.parse::<IpNet>().is_ok_and(|n| n.contains(&ip))
        });
        prop_assert_eq!(decision.is_allow(), contained);
        if !contained {
            prop_assert_eq!(decision.deny_reason(), Some(DenyReason::AddressNotMember));
        }
    }

    /// Every canonical network contains its own network and broadcast address.
    #[test]
    fn network_bounds_are_members(net in arb_v4_net()) {
        let ranges = vec![range(1, 1, &net.to_string())];
        prop_assert!(is_member(&net.network().to_string(), &ranges).is_allow());
        prop_assert!(is_member(&net.broadcast().to_string(), &ranges).is_allow());
    }

    /// Malformed addresses never panic and are always unresolvable.
    #[test]
    fn malformed_addresses_are_unresolvable(
        ranges in arb_disjoint_ranges(),
        addr in arb_garbage_address(),
    ) {
        prop_assume!(addr.trim().parse::<IpAddr>().is_err());
        prop_assert_eq!(
            is_member(&addr, &ranges).deny_reason(),
            Some(DenyReason::UnresolvableAddress)
        );
    }

    /// With overlapping blocks, the lowest sequence wins regardless of input order.
    #[test]
    fn lowest_sequence_wins(
        seqs in prop::collection::vec(-50i32..50, 2..6),
        host in 0u8..=255,
        reversed in any::<bool>(),
    ) {
        let mut ranges: Vec<NetworkRange> = seqs
            .iter()
            .enumerate()
            .map(|(i, s)| range(i as u64 + 1, 1, "172.16.0.0/16").with_sequence(*s))
            .collect();
        if reversed {
            ranges.reverse();
        }
        let expected = ranges
            .iter()
            .min_by(|a, b| a.sequence.cmp(&b.sequence).then(a.id.cmp(&b.id)))
            .map(|r| r.id.0);

        let decision = is_member(&format!("172.16.0.{host}"), &ranges);
        prop_assert_eq!(matched_id(&decision), expected);
    }
}

// ============================================================================
// Property tests: policy
// ============================================================================

proptest! {
    /// With the global switch off nothing is ever denied.
    #[test]
    fn global_switch_off_allows(
        ranges in arb_disjoint_ranges(),
        addr in prop_oneof![arb_garbage_address(), arb_v4_addr().prop_map(|a| a.to_string())],
        bypass in any::<bool>(),
    ) {
        let dir = directory(vec![enabled_location(1, "HQ", ranges)]);
        let resolver = PolicyResolver::new(PolicyConfig::default(), &dir);
        let actor = Actor::new(1, "Ann").at(1).with_bypass(bypass);
        prop_assert_eq!(
            resolver.evaluate(&actor, Action::CheckIn, Some(&addr)),
            AccessDecision::allow(AllowBasis::ChecksDisabled)
        );
    }

    /// Evaluation is a pure function of its inputs.
    #[test]
    fn evaluation_is_idempotent(ranges in arb_disjoint_ranges(), addr in arb_v4_addr()) {
        let dir = directory(vec![enabled_location(1, "HQ", ranges)]);
        let before = dir.clone();
        let resolver = PolicyResolver::new(PolicyConfig { checking_enabled: true }, &dir);
        let actor = Actor::new(1, "Ann").at(1);
        let addr = addr.to_string();
        let first = resolver.evaluate(&actor, Action::CheckOut, Some(&addr));
        let second = resolver.evaluate(&actor, Action::CheckOut, Some(&addr));
        prop_assert_eq!(first, second);
        prop_assert_eq!(dir, before);
    }
}

// ============================================================================
// Property tests: overlap
// ============================================================================

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_v4_net(), b in arb_v4_net()) {
        let (a, b) = (IpNet::V4(a), IpNet::V4(b));
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    /// Validation rejects a candidate exactly when it overlaps an active sibling.
    #[test]
    fn validation_matches_overlap(a in arb_v4_net(), b in arb_v4_net()) {
        prop_assume!(a != b);
        let existing = vec![range(1, 1, &a.to_string())];
        let candidate = range(2, 1, &b.to_string());
        let result = validate_range(&candidate, &existing);
        let expected = overlaps(
            &parse_network(&a.to_string()).expect("canonical"),
            &parse_network(&b.to_string()).expect("canonical"),
        );
        prop_assert_eq!(result.is_err(), expected);
    }
}
