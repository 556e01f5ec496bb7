//! Field-change classifier for attendance records.
//!
//! Hosts intercept attendance writes and ask this module which action, if any,
//! has to be authorized before commit.

use crate::error::DenyError;
use crate::gate::AccessGate;
use crate::model::Actor;
use crate::policy::LocationDirectory;
use ipcheck_types::{Action, AllowBasis};

pub const FIELD_CHECK_IN: &str = "check_in";
pub const FIELD_CHECK_OUT: &str = "check_out";

/// A pending write to an attendance record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttendanceMutation<'a> {
    Create,
    /// Names of the fields present in the write.
    Update(&'a [&'a str]),
    /// A kiosk or manual toggle; the employee's current attendance state picks
    /// the action.
    Manual { checked_in: bool },
}

/// Select the action to authorize for a mutation.
///
/// Creation is always a check-in. An update touching `check_out` is a check-out,
/// otherwise one touching `check_in` is a check-in. Other edits need no
/// authorization. A manual toggle checks out an employee who is checked in and
/// checks in everyone else.
pub fn classify(mutation: AttendanceMutation<'_>) -> Option<Action> {
    match mutation {
        AttendanceMutation::Create => Some(Action::CheckIn),
        AttendanceMutation::Update(fields) => {
            if fields.contains(&FIELD_CHECK_OUT) {
                Some(Action::CheckOut)
            } else if fields.contains(&FIELD_CHECK_IN) {
                Some(Action::CheckIn)
            } else {
                None
            }
        }
        AttendanceMutation::Manual { checked_in: true } => Some(Action::CheckOut),
        AttendanceMutation::Manual { checked_in: false } => Some(Action::CheckIn),
    }
}

/// Run the gate for a mutation when the classifier selects an action.
///
/// `Ok(None)` means the mutation does not touch the timestamps and was not
/// evaluated.
pub fn authorize_mutation<D: LocationDirectory + ?Sized>(
    gate: &AccessGate<'_, D>,
    actor: &Actor,
    mutation: AttendanceMutation<'_>,
    source: Option<&str>,
) -> Result<Option<AllowBasis>, DenyError> {
    match classify(mutation) {
        Some(action) => gate.authorize(actor, action, source).map(Some),
        None => Ok(None),
    }
}
