//! Config parsing and directory resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;
mod switch;

pub use model::{EmployeeConfig, IpcheckConfigV1, LocationConfig, RangeConfig, SCHEMA_CONFIG_V1};
pub use resolve::{Overrides, ResolvedConfig};
pub use switch::parse_switch;

/// Parse `ipcheck.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<IpcheckConfigV1> {
    let cfg: IpcheckConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy and the validated location/employee snapshot.
pub fn resolve_config(
    cfg: IpcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
