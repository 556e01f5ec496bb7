//! Capability guard for privileged writes.
//!
//! Kept apart from the policy resolver: it decides who may change the
//! configuration, not whether an attendance action is allowed.

use crate::error::GuardError;

pub const FIELD_BYPASS: &str = "bypass";
pub const FIELD_CHECK_ENABLED: &str = "check_enabled";
pub const FIELD_RANGES: &str = "ranges";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    User,
    Officer,
    Manager,
}

impl Role {
    pub fn is_privileged(self) -> bool {
        self == Role::Manager
    }
}

/// Reject a write to an employee that touches the bypass flag unless the writer
/// is a manager.
pub fn guard_actor_write(role: Role, changed_fields: &[&str]) -> Result<(), GuardError> {
    if changed_fields.contains(&FIELD_BYPASS) && !role.is_privileged() {
        return Err(GuardError::PrivilegedField {
            field: "IP check bypass",
        });
    }
    Ok(())
}

/// Reject a write to a location that touches its check flag or its ranges unless
/// the writer is a manager.
pub fn guard_location_write(role: Role, changed_fields: &[&str]) -> Result<(), GuardError> {
    if role.is_privileged() {
        return Ok(());
    }
    if changed_fields.contains(&FIELD_CHECK_ENABLED) {
        return Err(GuardError::PrivilegedField {
            field: "location IP check",
        });
    }
    if changed_fields.contains(&FIELD_RANGES) {
        return guard_range_write(role);
    }
    Ok(())
}

/// Creating, editing, or deleting a range is a manager-only operation.
pub fn guard_range_write(role: Role) -> Result<(), GuardError> {
    if role.is_privileged() {
        Ok(())
    } else {
        Err(GuardError::PrivilegedField {
            field: "allowed networks",
        })
    }
}
