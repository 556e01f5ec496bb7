use anyhow::bail;

/// Decode a stored boolean parameter such as the global check switch.
///
/// Absent or blank means off. Accepts `true/false`, `1/0`, `yes/no` and `on/off`
/// in any case.
pub fn parse_switch(raw: Option<&str>) -> anyhow::Result<bool> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(false);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("invalid switch value: {other} (expected true|false|1|0|yes|no|on|off)"),
    }
}
