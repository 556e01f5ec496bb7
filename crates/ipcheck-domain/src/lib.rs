//! Pure policy evaluation (no IO).
//!
//! Input: employee, location, and range records supplied by the host, plus the
//! caller's source address.
//! Output: an allow/deny decision, or a typed validation error at write time.

#![forbid(unsafe_code)]

pub mod cidr;
pub mod error;
pub mod gate;
pub mod guard;
pub mod matcher;
pub mod model;
pub mod mutation;
pub mod policy;
pub mod registry;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use error::{DenyError, GuardError, RangeError};
pub use gate::AccessGate;
pub use guard::{Role, guard_actor_write, guard_location_write, guard_range_write};
pub use matcher::is_member;
pub use model::{Actor, ActorId, Location, LocationId, NetworkRange, RangeId};
pub use mutation::{AttendanceMutation, authorize_mutation, classify};
pub use policy::{CheckRequirement, LocationDirectory, PolicyConfig, PolicyResolver};
pub use registry::{can_enable_location_check, validate_range, validate_update};
