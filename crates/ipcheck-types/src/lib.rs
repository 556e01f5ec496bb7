//! Stable DTOs and IDs used across the ipcheck workspace.
//!
//! This crate is intentionally boring:
//! - the decision types produced for every check-in/check-out evaluation
//! - stable string IDs for deny reasons and validation codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod decision;
pub mod explain;
pub mod ids;

pub use decision::{
    AccessDecision, Action, AllowBasis, DecisionRecord, DecisionStatus, DenyReason,
    SCHEMA_DECISION_V1,
};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
