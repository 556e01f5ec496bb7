//! Stable identifiers for deny reasons and validation codes.
//!
//! Every id is a short snake_case token. Hosts key their translations and log
//! filters on these, so they never change once published.

// Deny reasons (decision time)
pub const REASON_UNRESOLVABLE_ADDRESS: &str = "unresolvable_address";
pub const REASON_ADDRESS_NOT_MEMBER: &str = "address_not_member";
pub const REASON_NO_ACTIVE_RANGES: &str = "no_active_ranges";

// Validation codes (write time)
pub const CODE_INVALID_RANGE_FORMAT: &str = "invalid_range_format";
pub const CODE_OVERLAPPING_RANGE: &str = "overlapping_range";
pub const CODE_DUPLICATE_RANGE: &str = "duplicate_range";
pub const CODE_LOCATION_CHECK_WITHOUT_RANGES: &str = "location_check_without_ranges";
pub const CODE_DUPLICATE_RANGE_ID: &str = "duplicate_range_id";
pub const CODE_UNKNOWN_RANGE: &str = "unknown_range";

// Host boundary
pub const CODE_PRIVILEGED_FIELD: &str = "privileged_field";

// Actions
pub const ACTION_CHECK_IN: &str = "check_in";
pub const ACTION_CHECK_OUT: &str = "check_out";
