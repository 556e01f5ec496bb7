//! Use case orchestration for ipcheck.
//!
//! This crate provides the application layer: use cases that coordinate the
//! settings and domain layers. It is thin and delegates decisions to the domain.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod authorize;
mod explain;
mod source;
mod validate;

pub use authorize::{
    AuthorizeInput, AuthorizeOutput, decision_exit_code, run_authorize, serialize_record,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use source::{SourceInput, resolve_source_address};
pub use validate::{ValidateOutput, format_summary, run_validate};

/// Parse and resolve config text; empty text yields the defaults.
pub(crate) fn load_config(
    config_text: &str,
    overrides: ipcheck_settings::Overrides,
) -> anyhow::Result<ipcheck_settings::ResolvedConfig> {
    use anyhow::Context;

    let cfg = if config_text.trim().is_empty() {
        ipcheck_settings::IpcheckConfigV1::default()
    } else {
        ipcheck_settings::parse_config_toml(config_text).context("parse config")?
    };
    ipcheck_settings::resolve_config(cfg, overrides).context("resolve config")
}
