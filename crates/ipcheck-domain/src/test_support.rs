use crate::model::{Location, LocationId, NetworkRange};
use std::collections::BTreeMap;

/// An active range named `lan` with the default sequence.
pub fn range(id: u64, location: u64, cidr: &str) -> NetworkRange {
    NetworkRange::new(id, location, "lan", cidr)
}

pub fn enabled_location(id: u64, name: &str, ranges: Vec<NetworkRange>) -> Location {
    Location::snapshot(id, name, true, ranges)
}

pub fn directory(locations: Vec<Location>) -> BTreeMap<LocationId, Location> {
    locations.into_iter().map(|l| (l.id, l)).collect()
}
