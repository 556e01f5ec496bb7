//! Fuzz target for address matching and range validation.
//!
//! Goal: matching and validation should **never panic** on any input.
//! Malformed addresses and networks must come back as decisions or errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_address_match
//! ```

#![no_main]

use arbitrary::Arbitrary;
use ipcheck_domain::{NetworkRange, is_member, validate_range};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RangeInput {
    cidr: String,
    sequence: i32,
    active: bool,
}

#[derive(Arbitrary, Debug)]
struct MatchInput {
    address: String,
    ranges: Vec<RangeInput>,
}

fuzz_target!(|input: MatchInput| {
    if input.ranges.len() > 32 || input.address.len() > 128 {
        return;
    }

    let ranges: Vec<NetworkRange> = input
        .ranges
        .into_iter()
        .filter(|r| r.cidr.len() <= 128)
        .enumerate()
        .map(|(i, r)| {
            NetworkRange::new(i as u64, 1, "fuzz", r.cidr)
                .with_sequence(r.sequence)
                .with_active(r.active)
        })
        .collect();

    let _ = is_member(&input.address, &ranges);
    for range in &ranges {
        let _ = validate_range(range, &ranges);
    }
});
