use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable schema identifier for emitted decision records.
pub const SCHEMA_DECISION_V1: &str = "ipcheck.decision.v1";

/// The attendance action being authorized.
///
/// Both actions go through the identical policy path; the action only shows up
/// in messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CheckIn,
    CheckOut,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CheckIn => ids::ACTION_CHECK_IN,
            Action::CheckOut => ids::ACTION_CHECK_OUT,
        }
    }

    /// Human label used in deny messages.
    pub fn label(&self) -> &'static str {
        match self {
            Action::CheckIn => "Check In",
            Action::CheckOut => "Check Out",
        }
    }

    /// Accepts both `check_in` and `check-in` spellings.
    pub fn parse(v: &str) -> Option<Action> {
        match v.trim().replace('-', "_").as_str() {
            ids::ACTION_CHECK_IN => Some(Action::CheckIn),
            ids::ACTION_CHECK_OUT => Some(Action::CheckOut),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No source address was available, or it does not parse as an IP literal.
    UnresolvableAddress,
    /// The address parsed but no active range of the location contains it.
    AddressNotMember,
    /// Checking is required but the location has no active ranges.
    NoActiveRanges,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::UnresolvableAddress => ids::REASON_UNRESOLVABLE_ADDRESS,
            DenyReason::AddressNotMember => ids::REASON_ADDRESS_NOT_MEMBER,
            DenyReason::NoActiveRanges => ids::REASON_NO_ACTIVE_RANGES,
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which step of the decision order produced an allow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum AllowBasis {
    #[serde(rename = "checking_disabled")]
    ChecksDisabled,
    NoLocation,
    LocationCheckDisabled,
    Bypass,
    Matched {
        range_id: u64,
        range_name: String,
        cidr: String,
    },
}

impl AllowBasis {
    /// True when the allow was granted without looking at the address.
    pub fn is_exempt(&self) -> bool {
        !matches!(self, AllowBasis::Matched { .. })
    }
}

/// Ephemeral outcome of one evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allow { basis: AllowBasis },
    Deny { reason: DenyReason, detail: String },
}

impl AccessDecision {
    pub fn allow(basis: AllowBasis) -> Self {
        AccessDecision::Allow { basis }
    }

    pub fn deny(reason: DenyReason, detail: impl Into<String>) -> Self {
        AccessDecision::Deny {
            reason,
            detail: detail.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, AccessDecision::Allow { .. })
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            AccessDecision::Allow { .. } => None,
            AccessDecision::Deny { reason, .. } => Some(*reason),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Allow,
    Deny,
}

/// Serializable record of one authorization, as handed back to a host or
/// printed by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionRecord {
    pub schema: String,
    pub actor_id: u64,
    pub action: Action,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,

    pub status: DecisionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<AllowBasis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,

    /// Formatted deny message, shown to the caller untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DecisionRecord {
    pub fn allowed(
        actor_id: u64,
        action: Action,
        source_address: Option<String>,
        basis: AllowBasis,
    ) -> Self {
        Self {
            schema: SCHEMA_DECISION_V1.to_string(),
            actor_id,
            action,
            source_address,
            status: DecisionStatus::Allow,
            basis: Some(basis),
            reason: None,
            message: None,
        }
    }

    pub fn denied(
        actor_id: u64,
        action: Action,
        source_address: Option<String>,
        reason: DenyReason,
        message: String,
    ) -> Self {
        Self {
            schema: SCHEMA_DECISION_V1.to_string(),
            actor_id,
            action,
            source_address,
            status: DecisionStatus::Deny,
            basis: None,
            reason: Some(reason),
            message: Some(message),
        }
    }
}
