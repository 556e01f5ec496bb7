//! The `validate` use case: resolve a config and summarize it.

use ipcheck_settings::Overrides;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidateOutput {
    pub checking_enabled: bool,
    pub locations: usize,
    pub checked_locations: usize,
    pub ranges: usize,
    pub active_ranges: usize,
    pub employees: usize,
    pub bypassed_employees: usize,
}

/// Fails with the first validation error, the same one a host would raise when
/// the offending record was written.
pub fn run_validate(config_text: &str) -> anyhow::Result<ValidateOutput> {
    let resolved = crate::load_config(config_text, Overrides::default())?;

    Ok(ValidateOutput {
        checking_enabled: resolved.policy.checking_enabled,
        locations: resolved.locations.len(),
        checked_locations: resolved
            .locations
            .values()
            .filter(|l| l.check_enabled())
            .count(),
        ranges: resolved.range_count(),
        active_ranges: resolved.active_range_count(),
        employees: resolved.employees.len(),
        bypassed_employees: resolved.employees.values().filter(|a| a.bypass).count(),
    })
}

pub fn format_summary(out: &ValidateOutput) -> String {
    format!(
        "config ok: checking {}, {} location(s) ({} checked), {} range(s) ({} active), {} employee(s) ({} bypassed)\n",
        if out.checking_enabled { "enabled" } else { "disabled" },
        out.locations,
        out.checked_locations,
        out.ranges,
        out.active_ranges,
        out.employees,
        out.bypassed_employees,
    )
}
