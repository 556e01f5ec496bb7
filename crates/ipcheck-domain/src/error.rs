use crate::cidr::CidrError;
use crate::model::RangeId;
use ipcheck_types::{DenyReason, ids};
use thiserror::Error;

/// Write-time validation failure for a range or a location's check flag.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Invalid CIDR {cidr}: {source}")]
    InvalidRangeFormat {
        cidr: String,
        #[source]
        source: CidrError,
    },

    #[error("CIDR {cidr} overlaps with existing {existing} ({existing_name})")]
    OverlappingRange {
        cidr: String,
        existing: String,
        existing_name: String,
    },

    #[error("CIDR {cidr} must be unique per location")]
    DuplicateRange { cidr: String },

    #[error("Location {location} must have at least one active range before its check can be enabled")]
    LocationCheckWithoutRanges { location: String },

    #[error("Range {0} does not exist")]
    UnknownRange(RangeId),

    #[error("Range {0} already exists")]
    DuplicateRangeId(RangeId),
}

impl RangeError {
    /// Stable code for the failure (see `ipcheck_types::ids`).
    pub fn code(&self) -> &'static str {
        match self {
            RangeError::InvalidRangeFormat { .. } => ids::CODE_INVALID_RANGE_FORMAT,
            RangeError::OverlappingRange { .. } => ids::CODE_OVERLAPPING_RANGE,
            RangeError::DuplicateRange { .. } => ids::CODE_DUPLICATE_RANGE,
            RangeError::DuplicateRangeId(_) => ids::CODE_DUPLICATE_RANGE_ID,
            RangeError::LocationCheckWithoutRanges { .. } => {
                ids::CODE_LOCATION_CHECK_WITHOUT_RANGES
            }
            RangeError::UnknownRange(_) => ids::CODE_UNKNOWN_RANGE,
        }
    }
}

/// Raised by the access gate; the host aborts the mutation and shows `message`
/// to the caller untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DenyError {
    pub reason: DenyReason,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("Only managers can modify the {field} setting.")]
    PrivilegedField { field: &'static str },
}

impl GuardError {
    pub fn code(&self) -> &'static str {
        match self {
            GuardError::PrivilegedField { .. } => ids::CODE_PRIVILEGED_FIELD,
        }
    }
}
