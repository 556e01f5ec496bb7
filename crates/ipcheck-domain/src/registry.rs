//! Write-time validation of network ranges and location check flags.
//!
//! The free functions validate a candidate against sibling records supplied by
//! the host. `Location`'s mutating methods run the same validations against the
//! ranges it owns.

use crate::cidr::{overlaps, parse_network};
use crate::error::RangeError;
use crate::model::{Location, NetworkRange, RangeId, priority_order};

/// Validate a range before it is committed to its location.
///
/// `siblings` may include the candidate itself (matched by id) and ranges of
/// other locations; both are ignored.
pub fn validate_range(candidate: &NetworkRange, siblings: &[NetworkRange]) -> Result<(), RangeError> {
    let network = parse_network(&candidate.cidr).map_err(|source| RangeError::InvalidRangeFormat {
        cidr: candidate.cidr.clone(),
        source,
    })?;

    let others: Vec<&NetworkRange> = siblings
        .iter()
        .filter(|s| s.id != candidate.id && s.location == candidate.location)
        .collect();

    // Uniqueness holds regardless of the active flag.
    for sibling in &others {
        let same_text = sibling.cidr.trim() == candidate.cidr.trim();
        let same_network = parse_network(&sibling.cidr).is_ok_and(|n| n == network);
        if same_text || same_network {
            return Err(RangeError::DuplicateRange {
                cidr: candidate.cidr.trim().to_string(),
            });
        }
    }

    if !candidate.active {
        return Ok(());
    }

    for sibling in others.iter().filter(|s| s.active) {
        let Ok(existing) = parse_network(&sibling.cidr) else {
            tracing::debug!(
                range_id = sibling.id.0,
                cidr = %sibling.cidr,
                "ignoring malformed sibling during overlap check"
            );
            continue;
        };
        if overlaps(&network, &existing) {
            return Err(RangeError::OverlappingRange {
                cidr: candidate.cidr.trim().to_string(),
                existing: sibling.cidr.trim().to_string(),
                existing_name: sibling.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate an edit. Checks only run when the CIDR, the active flag, or the
/// owning location changed.
pub fn validate_update(
    previous: &NetworkRange,
    updated: &NetworkRange,
    siblings: &[NetworkRange],
) -> Result<(), RangeError> {
    let relevant = previous.cidr != updated.cidr
        || previous.active != updated.active
        || previous.location != updated.location;
    if !relevant {
        return Ok(());
    }
    validate_range(updated, siblings)
}

/// A location's check may only be enabled while it has an active range.
pub fn can_enable_location_check(location: &Location) -> bool {
    location.has_active_range()
}

impl Location {
    /// Add a range. The range is re-homed to this location.
    pub fn insert_range(&mut self, mut range: NetworkRange) -> Result<(), RangeError> {
        range.location = self.id;
        if self.range(range.id).is_some() {
            return Err(RangeError::DuplicateRangeId(range.id));
        }
        validate_range(&range, &self.ranges)?;
        self.ranges.push(range);
        self.ranges.sort_by(priority_order);
        Ok(())
    }

    /// Replace an existing range (matched by id).
    pub fn update_range(&mut self, mut updated: NetworkRange) -> Result<(), RangeError> {
        updated.location = self.id;
        let previous = self
            .range(updated.id)
            .ok_or(RangeError::UnknownRange(updated.id))?;
        validate_update(previous, &updated, &self.ranges)?;

        if let Some(slot) = self.ranges.iter_mut().find(|r| r.id == updated.id) {
            *slot = updated;
        }
        self.ranges.sort_by(priority_order);
        Ok(())
    }

    /// Deactivate a range instead of deleting it.
    pub fn deactivate_range(&mut self, id: RangeId) -> Result<(), RangeError> {
        let mut updated = self.range(id).cloned().ok_or(RangeError::UnknownRange(id))?;
        updated.active = false;
        self.update_range(updated)
    }

    /// Delete a range. Remaining ranges are not re-validated and the location's
    /// check flag is left as is; evaluation fails closed if no active range is
    /// left.
    pub fn remove_range(&mut self, id: RangeId) -> Option<NetworkRange> {
        let idx = self.ranges.iter().position(|r| r.id == id)?;
        Some(self.ranges.remove(idx))
    }

    pub fn set_check_enabled(&mut self, enabled: bool) -> Result<(), RangeError> {
        if enabled && !can_enable_location_check(self) {
            return Err(RangeError::LocationCheckWithoutRanges {
                location: self.name.clone(),
            });
        }
        self.check_enabled = enabled;
        Ok(())
    }
}
