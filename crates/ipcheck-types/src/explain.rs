//! Explain registry for deny reasons and validation codes.
//!
//! Maps every stable id to a human-readable explanation with remediation guidance.

use crate::ids;

/// Explanation entry for a reason or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the reason/code.
    pub title: &'static str,
    /// When it is produced and what it means.
    pub description: &'static str,
    /// How to resolve it.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that produces the reason/code.
    pub before: &'static str,
    /// Configuration that resolves it.
    pub after: &'static str,
}

/// Look up an explanation by reason or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::REASON_UNRESOLVABLE_ADDRESS => Some(explain_unresolvable_address()),
        ids::REASON_ADDRESS_NOT_MEMBER => Some(explain_address_not_member()),
        ids::REASON_NO_ACTIVE_RANGES => Some(explain_no_active_ranges()),
        ids::CODE_INVALID_RANGE_FORMAT => Some(explain_invalid_range_format()),
        ids::CODE_OVERLAPPING_RANGE => Some(explain_overlapping_range()),
        ids::CODE_DUPLICATE_RANGE => Some(explain_duplicate_range()),
        ids::CODE_DUPLICATE_RANGE_ID => Some(explain_duplicate_range_id()),
        ids::CODE_LOCATION_CHECK_WITHOUT_RANGES => Some(explain_location_check_without_ranges()),
        ids::CODE_UNKNOWN_RANGE => Some(explain_unknown_range()),
        ids::CODE_PRIVILEGED_FIELD => Some(explain_privileged_field()),
        _ => None,
    }
}

/// List all deny reasons.
pub fn all_reasons() -> &'static [&'static str] {
    &[
        ids::REASON_UNRESOLVABLE_ADDRESS,
        ids::REASON_ADDRESS_NOT_MEMBER,
        ids::REASON_NO_ACTIVE_RANGES,
    ]
}

/// List all known ids (reasons first, then validation codes).
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::REASON_UNRESOLVABLE_ADDRESS,
        ids::REASON_ADDRESS_NOT_MEMBER,
        ids::REASON_NO_ACTIVE_RANGES,
        ids::CODE_INVALID_RANGE_FORMAT,
        ids::CODE_OVERLAPPING_RANGE,
        ids::CODE_DUPLICATE_RANGE,
        ids::CODE_DUPLICATE_RANGE_ID,
        ids::CODE_LOCATION_CHECK_WITHOUT_RANGES,
        ids::CODE_UNKNOWN_RANGE,
        ids::CODE_PRIVILEGED_FIELD,
    ]
}

// --- Deny reasons ---

fn explain_unresolvable_address() -> Explanation {
    Explanation {
        title: "Unresolvable Source Address",
        description: "\
The check-in or check-out came from a request whose source address could not be
determined, or the address is not a valid IPv4/IPv6 literal.

Range checking was required for the employee, so the action is denied rather than
allowed on an unknown origin.",
        remediation: "\
Make sure the host passes the caller's address:
- When running behind a reverse proxy, enable `trust_proxy_headers` so the
  `X-Forwarded-For` / `X-Real-IP` headers are used
- Otherwise check that the peer address reaches the application",
        examples: ExamplePair {
            before: r#"checking_enabled = true
trust_proxy_headers = false  # proxy hides the client address"#,
            after: r#"checking_enabled = true
trust_proxy_headers = true"#,
        },
    }
}

fn explain_address_not_member() -> Explanation {
    Explanation {
        title: "Address Outside Allowed Ranges",
        description: "\
The source address is valid, but none of the active network ranges of the
employee's work location contains it.

Ranges are evaluated in ascending sequence order and the first match wins.",
        remediation: "\
Either perform the action from the location's network, add a range that covers
the address, or grant the employee a bypass (managers only).",
        examples: ExamplePair {
            before: r#"[[locations]]
id = 1
name = "Main Office"
check_enabled = true

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24""#,
            after: r#"[[locations]]
id = 1
name = "Main Office"
check_enabled = true

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24"

[[locations.ranges]]
id = 2
name = "Office Wi-Fi"
cidr = "10.20.0.0/16""#,
        },
    }
}

fn explain_no_active_ranges() -> Explanation {
    Explanation {
        title: "No Active Ranges",
        description: "\
Range checking is required for the employee's location, but the location has no
active network range (all were deactivated or deleted), or the location could not
be found.

This is a configuration defect. The check fails closed: every address is denied.",
        remediation: "\
Activate or add at least one range for the location, or disable the location's
check.",
        examples: ExamplePair {
            before: r#"[[locations]]
id = 1
name = "Main Office"
check_enabled = true

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24"
active = false"#,
            after: r#"[[locations]]
id = 1
name = "Main Office"
check_enabled = true

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24"
active = true"#,
        },
    }
}

// --- Validation codes ---

fn explain_invalid_range_format() -> Explanation {
    Explanation {
        title: "Invalid Range Format",
        description: "\
A network range must be written as `address/prefix`, with a prefix of 0-32 for
IPv4 or 0-128 for IPv6, and no host bits set below the prefix.",
        remediation: "\
Write the network address of the block, not a host inside it.",
        examples: ExamplePair {
            before: r#"cidr = "192.168.1.5/24""#,
            after: r#"cidr = "192.168.1.0/24""#,
        },
    }
}

fn explain_overlapping_range() -> Explanation {
    Explanation {
        title: "Overlapping Range",
        description: "\
Two active ranges of the same location share at least one address. Inactive ranges
are exempt, and ranges of different locations never conflict.",
        remediation: "\
Remove the narrower range, deactivate one of them, or split the block so that the
ranges are disjoint.",
        examples: ExamplePair {
            before: r#"cidr = "192.168.1.0/24"
# ...
cidr = "192.168.1.128/25""#,
            after: r#"cidr = "192.168.1.0/24""#,
        },
    }
}

fn explain_duplicate_range() -> Explanation {
    Explanation {
        title: "Duplicate Range",
        description: "\
The same network is declared twice for one location. Uniqueness holds whether or
not the ranges are active.",
        remediation: "\
Keep a single entry per network and location.",
        examples: ExamplePair {
            before: r#"cidr = "10.0.0.0/8"
# ...
cidr = "10.0.0.0/8""#,
            after: r#"cidr = "10.0.0.0/8""#,
        },
    }
}

fn explain_duplicate_range_id() -> Explanation {
    Explanation {
        title: "Duplicate Range Id",
        description: "\
Two ranges are declared with the same id. Range ids identify a range across all
locations, so each one may appear only once.",
        remediation: "\
Give every range its own id.",
        examples: ExamplePair {
            before: r#"[[locations]]
id = 1
name = "Main Office"

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24"

[[locations]]
id = 2
name = "Warehouse"

[[locations.ranges]]
id = 1
name = "Dock"
cidr = "10.20.0.0/16""#,
            after: r#"[[locations]]
id = 1
name = "Main Office"

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24"

[[locations]]
id = 2
name = "Warehouse"

[[locations.ranges]]
id = 2
name = "Dock"
cidr = "10.20.0.0/16""#,
        },
    }
}

fn explain_location_check_without_ranges() -> Explanation {
    Explanation {
        title: "Location Check Without Ranges",
        description: "\
A location's check can only be enabled while it has at least one active range.",
        remediation: "\
Add an active range first, then enable the check.",
        examples: ExamplePair {
            before: r#"[[locations]]
id = 2
name = "Warehouse"
check_enabled = true"#,
            after: r#"[[locations]]
id = 2
name = "Warehouse"
check_enabled = true

[[locations.ranges]]
id = 5
name = "Warehouse LAN"
cidr = "172.16.0.0/24""#,
        },
    }
}

fn explain_unknown_range() -> Explanation {
    Explanation {
        title: "Unknown Range",
        description: "\
An update referred to a range id that the location does not own. The range was
deleted, or belongs to another location.",
        remediation: "\
Reload the location and retry the edit against an existing range.",
        examples: ExamplePair {
            before: "update range #42  # deleted earlier",
            after: "update range #7",
        },
    }
}

fn explain_privileged_field() -> Explanation {
    Explanation {
        title: "Privileged Field",
        description: "\
Employee bypass flags, network ranges, and a location's check flag can only be
modified by a manager.",
        remediation: "\
Ask a manager to perform the change.",
        examples: ExamplePair {
            before: "role = \"officer\"  # writes bypass = true",
            after: "role = \"manager\"  # writes bypass = true",
        },
    }
}
