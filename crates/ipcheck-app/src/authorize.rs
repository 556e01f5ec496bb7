//! The `authorize` use case: resolve config, pick the source address, run the gate.

use anyhow::Context;
use ipcheck_settings::{Overrides, ResolvedConfig};
use ipcheck_types::{Action, DecisionRecord, DecisionStatus};

use crate::source::{SourceInput, resolve_source_address};

/// Input for the authorize use case.
#[derive(Clone, Debug)]
pub struct AuthorizeInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub employee_id: u64,
    pub action: Action,
    pub source: SourceInput,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the authorize use case.
#[derive(Clone, Debug)]
pub struct AuthorizeOutput {
    pub record: DecisionRecord,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the authorize use case. A deny is a successful run; only configuration
/// problems and unknown employees are errors.
pub fn run_authorize(input: AuthorizeInput<'_>) -> anyhow::Result<AuthorizeOutput> {
    let resolved = crate::load_config(input.config_text, input.overrides.clone())?;

    let actor = resolved
        .employee(input.employee_id)
        .with_context(|| format!("unknown employee {}", input.employee_id))?;

    let address = resolve_source_address(&input.source, resolved.trust_proxy_headers);
    tracing::debug!(
        employee = input.employee_id,
        action = input.action.as_str(),
        address = address.as_deref().unwrap_or("-"),
        "authorizing"
    );

    let record = match resolved
        .gate()
        .authorize(actor, input.action, address.as_deref())
    {
        Ok(basis) => {
            tracing::debug!(
                employee = input.employee_id,
                exempt = basis.is_exempt(),
                "allowed"
            );
            DecisionRecord::allowed(actor.id.0, input.action, address, basis)
        }
        Err(deny) => {
            DecisionRecord::denied(actor.id.0, input.action, address, deny.reason, deny.message)
        }
    };

    Ok(AuthorizeOutput {
        record,
        resolved_config: resolved,
    })
}

pub fn decision_exit_code(record: &DecisionRecord) -> i32 {
    match record.status {
        DecisionStatus::Allow => 0,
        DecisionStatus::Deny => 2,
    }
}

/// Pretty JSON with a trailing newline.
pub fn serialize_record(record: &DecisionRecord) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(record).context("serialize decision record")?;
    out.push('\n');
    Ok(out)
}
