use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "ipcheck.config.v1";

/// `ipcheck.toml` schema v1.
///
/// User-facing and permissive: optional fields fall back to the same defaults a
/// host record would have.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IpcheckConfigV1 {
    /// Optional schema string for tooling (`ipcheck.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Global switch. Off when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checking_enabled: Option<bool>,

    /// Read `X-Forwarded-For` / `X-Real-IP` when resolving the source address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_proxy_headers: Option<bool>,

    #[serde(default)]
    pub locations: Vec<LocationConfig>,

    #[serde(default)]
    pub employees: Vec<EmployeeConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationConfig {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub check_enabled: bool,

    #[serde(default)]
    pub ranges: Vec<RangeConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RangeConfig {
    pub id: u64,
    pub name: String,
    /// `address/prefix`, e.g. `192.168.1.0/24`.
    pub cidr: String,

    /// Evaluation priority, lower first. Defaults to 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,

    /// Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeConfig {
    pub id: u64,
    pub name: String,

    /// Work location id. Employees without one are never checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<u64>,

    #[serde(default)]
    pub bypass: bool,
}
