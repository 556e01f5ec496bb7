use std::fmt;

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                $name(value)
            }
        }
    };
}

record_id!(RangeId);
record_id!(LocationId);
record_id!(ActorId);

/// Sequence given to ranges that do not specify one.
pub const DEFAULT_SEQUENCE: i32 = 10;

/// A named CIDR block belonging to one location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRange {
    pub id: RangeId,
    pub location: LocationId,
    pub name: String,
    /// Stored as written; parsed at validation and match time.
    pub cidr: String,
    /// Lower is evaluated first.
    pub sequence: i32,
    pub active: bool,
}

impl NetworkRange {
    pub fn new(
        id: impl Into<RangeId>,
        location: impl Into<LocationId>,
        name: impl Into<String>,
        cidr: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            name: name.into(),
            cidr: cidr.into(),
            sequence: DEFAULT_SEQUENCE,
            active: true,
        }
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Evaluation order: ascending sequence, then id.
pub(crate) fn priority_order(a: &NetworkRange, b: &NetworkRange) -> std::cmp::Ordering {
    a.sequence.cmp(&b.sequence).then(a.id.cmp(&b.id))
}

/// A work location and the network ranges it owns.
///
/// Ranges are kept in evaluation order. Mutations go through the registry
/// methods (`insert_range`, `update_range`, ...), which enforce the write-time
/// invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub(crate) check_enabled: bool,
    pub(crate) ranges: Vec<NetworkRange>,
}

impl Location {
    /// A new location with checking disabled and no ranges.
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            check_enabled: false,
            ranges: Vec::new(),
        }
    }

    /// Rebuild a location from stored records without re-running write-time
    /// validation.
    ///
    /// Stored state can legitimately drift from the write-time invariants (for
    /// example every range deactivated after the check was enabled); the
    /// evaluator handles that by failing closed.
    pub fn snapshot(
        id: impl Into<LocationId>,
        name: impl Into<String>,
        check_enabled: bool,
        ranges: Vec<NetworkRange>,
    ) -> Self {
        let id = id.into();
        let mut ranges: Vec<NetworkRange> = ranges
            .into_iter()
            .map(|mut r| {
                r.location = id;
                r
            })
            .collect();
        ranges.sort_by(priority_order);
        Self {
            id,
            name: name.into(),
            check_enabled,
            ranges,
        }
    }

    pub fn check_enabled(&self) -> bool {
        self.check_enabled
    }

    /// All ranges, active or not, in evaluation order.
    pub fn ranges(&self) -> &[NetworkRange] {
        &self.ranges
    }

    pub fn range(&self, id: RangeId) -> Option<&NetworkRange> {
        self.ranges.iter().find(|r| r.id == id)
    }

    pub fn active_ranges(&self) -> impl Iterator<Item = &NetworkRange> {
        self.ranges.iter().filter(|r| r.active)
    }

    pub fn has_active_range(&self) -> bool {
        self.ranges.iter().any(|r| r.active)
    }
}

/// An employee as seen by the policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    /// Non-owning reference; many actors share one location.
    pub location: Option<LocationId>,
    /// Exempts the actor from range checking. Only managers may set it.
    pub bypass: bool,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
            bypass: false,
        }
    }

    pub fn at(mut self, location: impl Into<LocationId>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_orders_by_sequence_then_id() {
        let loc = Location::snapshot(
            1,
            "HQ",
            true,
            vec![
                NetworkRange::new(3, 1, "c", "10.0.3.0/24").with_sequence(5),
                NetworkRange::new(1, 1, "a", "10.0.1.0/24"),
                NetworkRange::new(2, 1, "b", "10.0.2.0/24").with_sequence(5),
            ],
        );
        let ids: Vec<u64> = loc.ranges().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn snapshot_rehomes_ranges() {
        let loc = Location::snapshot(9, "HQ", false, vec![NetworkRange::new(1, 4, "a", "10.0.0.0/8")]);
        assert_eq!(loc.ranges()[0].location, LocationId(9));
    }

    #[test]
    fn new_range_defaults() {
        let r = NetworkRange::new(1, 1, "lan", "192.168.1.0/24");
        assert_eq!(r.sequence, DEFAULT_SEQUENCE);
        assert!(r.active);
        assert_eq!(RangeId(1).to_string(), "#1");
    }
}
