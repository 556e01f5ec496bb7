use crate::model::{EmployeeConfig, IpcheckConfigV1, LocationConfig, SCHEMA_CONFIG_V1};
use anyhow::{Context, bail};
use ipcheck_domain::model::DEFAULT_SEQUENCE;
use ipcheck_domain::{
    AccessGate, Actor, ActorId, Location, LocationId, NetworkRange, PolicyConfig, RangeError,
    RangeId,
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub checking_enabled: Option<bool>,
    pub trust_proxy_headers: Option<bool>,
}

/// Validated snapshot of the policy inputs.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: PolicyConfig,
    pub trust_proxy_headers: bool,
    pub locations: BTreeMap<LocationId, Location>,
    pub employees: BTreeMap<ActorId, Actor>,
}

impl ResolvedConfig {
    pub fn employee(&self, id: u64) -> Option<&Actor> {
        self.employees.get(&ActorId(id))
    }

    pub fn gate(&self) -> AccessGate<'_, BTreeMap<LocationId, Location>> {
        AccessGate::new(self.policy, &self.locations)
    }

    pub fn range_count(&self) -> usize {
        self.locations.values().map(|l| l.ranges().len()).sum()
    }

    pub fn active_range_count(&self) -> usize {
        self.locations.values().map(|l| l.active_ranges().count()).sum()
    }
}

pub fn resolve_config(
    cfg: IpcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let policy = PolicyConfig {
        checking_enabled: overrides
            .checking_enabled
            .or(cfg.checking_enabled)
            .unwrap_or(false),
    };
    let trust_proxy_headers = overrides
        .trust_proxy_headers
        .or(cfg.trust_proxy_headers)
        .unwrap_or(false);

    let mut locations = BTreeMap::new();
    let mut range_ids = BTreeSet::new();
    for lc in &cfg.locations {
        let location = build_location(lc, &mut range_ids)
            .with_context(|| format!("invalid location {} ({})", lc.name, lc.id))?;
        if locations.insert(location.id, location).is_some() {
            bail!("duplicate location id {}", lc.id);
        }
    }

    let mut employees = BTreeMap::new();
    for ec in &cfg.employees {
        let actor = build_employee(ec, &locations)?;
        if employees.insert(actor.id, actor).is_some() {
            bail!("duplicate employee id {}", ec.id);
        }
    }

    Ok(ResolvedConfig {
        policy,
        trust_proxy_headers,
        locations,
        employees,
    })
}

/// Ranges go through the registry in declared order, then the check flag is
/// applied, so a file fails with the same errors an interactive edit would.
fn build_location(lc: &LocationConfig, range_ids: &mut BTreeSet<u64>) -> anyhow::Result<Location> {
    let mut location = Location::new(lc.id, lc.name.clone());

    for rc in &lc.ranges {
        if !range_ids.insert(rc.id) {
            return Err(RangeError::DuplicateRangeId(RangeId(rc.id)).into());
        }
        let range = NetworkRange::new(rc.id, lc.id, rc.name.clone(), rc.cidr.clone())
            .with_sequence(rc.sequence.unwrap_or(DEFAULT_SEQUENCE))
            .with_active(rc.active.unwrap_or(true));
        location
            .insert_range(range)
            .with_context(|| format!("range {} ({})", rc.name, rc.id))?;
    }

    location.set_check_enabled(lc.check_enabled)?;
    Ok(location)
}

fn build_employee(
    ec: &EmployeeConfig,
    locations: &BTreeMap<LocationId, Location>,
) -> anyhow::Result<Actor> {
    let mut actor = Actor::new(ec.id, ec.name.clone()).with_bypass(ec.bypass);
    if let Some(loc) = ec.location {
        if !locations.contains_key(&LocationId(loc)) {
            bail!(
                "employee {} ({}) refers to unknown location {}",
                ec.name,
                ec.id,
                LocationId(loc)
            );
        }
        actor = actor.at(loc);
    }
    Ok(actor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use ipcheck_types::{Action, AllowBasis, DenyReason, ids};

    const OFFICE: &str = r#"
checking_enabled = true

[[locations]]
id = 1
name = "Main Office"
check_enabled = true

[[locations.ranges]]
id = 1
name = "Office LAN"
cidr = "192.168.1.0/24"

[[locations.ranges]]
id = 2
name = "Guest"
cidr = "192.168.1.128/25"
active = false

[[locations]]
id = 2
name = "Remote"

[[employees]]
id = 1
name = "Ann"
location = 1

[[employees]]
id = 2
name = "Bo"
location = 1
bypass = true

[[employees]]
id = 3
name = "Cy"
"#;

    fn resolve(text: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(text)?, Overrides::default())
    }

    fn range_error(err: &anyhow::Error) -> Option<&RangeError> {
        err.chain().find_map(|e| e.downcast_ref::<RangeError>())
    }

    #[test]
    fn resolves_office_snapshot() {
        let resolved = resolve(OFFICE).expect("resolve");
        assert!(resolved.policy.checking_enabled);
        assert!(!resolved.trust_proxy_headers);
        assert_eq!(resolved.locations.len(), 2);
        assert_eq!(resolved.range_count(), 2);
        assert_eq!(resolved.active_range_count(), 1);
        assert_eq!(resolved.employees.len(), 3);

        let main = &resolved.locations[&LocationId(1)];
        assert!(main.check_enabled());
        assert!(!resolved.locations[&LocationId(2)].check_enabled());
        assert_eq!(resolved.employee(3).and_then(|a| a.location), None);
        assert!(resolved.employee(2).is_some_and(|a| a.bypass));
    }

    #[test]
    fn gate_uses_resolved_snapshot() {
        let resolved = resolve(OFFICE).expect("resolve");
        let gate = resolved.gate();
        let ann = resolved.employee(1).expect("ann");
        let basis = gate
            .authorize(ann, Action::CheckIn, Some("192.168.1.10"))
            .expect("inside");
        assert!(matches!(basis, AllowBasis::Matched { range_id: 1, .. }));
        let err = gate
            .authorize(ann, Action::CheckIn, Some("10.0.0.1"))
            .expect_err("outside");
        assert_eq!(err.reason, DenyReason::AddressNotMember);
    }

    #[test]
    fn empty_config_is_disabled() {
        let resolved = resolve("").expect("empty");
        assert!(!resolved.policy.checking_enabled);
        assert!(resolved.locations.is_empty());
    }

    #[test]
    fn overrides_win() {
        let cfg = parse_config_toml(OFFICE).expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                checking_enabled: Some(false),
                trust_proxy_headers: Some(true),
            },
        )
        .expect("resolve");
        assert!(!resolved.policy.checking_enabled);
        assert!(resolved.trust_proxy_headers);
    }

    #[test]
    fn overlapping_ranges_fail_resolution() {
        let text = r#"
[[locations]]
id = 1
name = "HQ"

[[locations.ranges]]
id = 1
name = "a"
cidr = "10.0.0.0/8"

[[locations.ranges]]
id = 2
name = "b"
cidr = "10.1.0.0/16"
"#;
        let err = resolve(text).expect_err("overlap");
        assert_eq!(
            range_error(&err).map(RangeError::code),
            Some(ids::CODE_OVERLAPPING_RANGE)
        );
        assert!(format!("{err:#}").contains("invalid location HQ (1)"));
    }

    #[test]
    fn enabling_check_without_active_range_fails() {
        let text = r#"
[[locations]]
id = 1
name = "HQ"
check_enabled = true

[[locations.ranges]]
id = 1
name = "old"
cidr = "10.0.0.0/8"
active = false
"#;
        let err = resolve(text).expect_err("no active range");
        assert_eq!(
            range_error(&err).map(RangeError::code),
            Some(ids::CODE_LOCATION_CHECK_WITHOUT_RANGES)
        );
    }

    #[test]
    fn invalid_cidr_fails() {
        let text = r#"
[[locations]]
id = 1
name = "HQ"

[[locations.ranges]]
id = 1
name = "bad"
cidr = "192.168.1.0/33"
"#;
        let err = resolve(text).expect_err("bad cidr");
        assert_eq!(
            range_error(&err).map(RangeError::code),
            Some(ids::CODE_INVALID_RANGE_FORMAT)
        );
    }

    #[test]
    fn unknown_employee_location_is_rejected() {
        let text = r#"
[[employees]]
id = 1
name = "Ann"
location = 9
"#;
        let err = resolve(text).expect_err("unknown location");
        assert!(err.to_string().contains("unknown location #9"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = r#"
[[locations]]
id = 1
name = "A"

[[locations]]
id = 1
name = "B"
"#;
        assert!(resolve(text).is_err());

        let text = r#"
[[locations]]
id = 1
name = "A"

[[locations.ranges]]
id = 1
name = "a"
cidr = "10.0.0.0/8"

[[locations]]
id = 2
name = "B"

[[locations.ranges]]
id = 1
name = "b"
cidr = "172.16.0.0/12"
"#;
        let err = resolve(text).expect_err("range id reuse");
        assert!(format!("{err:#}").contains("Range #1 already exists"));
        assert_eq!(
            range_error(&err).map(RangeError::code),
            Some(ids::CODE_DUPLICATE_RANGE_ID)
        );

        let text = r#"
[[employees]]
id = 4
name = "Ann"

[[employees]]
id = 4
name = "Bo"
"#;
        assert!(resolve(text).is_err());
    }

    #[test]
    fn foreign_schema_is_rejected() {
        let err = resolve("schema = \"other.v2\"").expect_err("schema");
        assert!(err.to_string().contains("unsupported config schema"));
        resolve("schema = \"ipcheck.config.v1\"").expect("own schema");
    }

    #[test]
    fn explained_fixes_are_valid_config() {
        let mut checked = 0;
        for code in ipcheck_types::explain::all_codes() {
            let exp = ipcheck_types::lookup_explanation(code).expect("explained");
            if !exp.examples.after.contains("[[locations]]") {
                continue;
            }
            resolve(exp.examples.after)
                .unwrap_or_else(|e| panic!("{code} example does not resolve: {e:#}"));
            checked += 1;
        }
        assert!(checked >= 4, "only {checked} full examples");
    }

    #[test]
    fn explained_range_id_reuse_is_rejected() {
        let exp =
            ipcheck_types::lookup_explanation(ids::CODE_DUPLICATE_RANGE_ID).expect("explained");
        let err = resolve(exp.examples.before).expect_err("id reuse");
        assert_eq!(
            range_error(&err).map(RangeError::code),
            Some(ids::CODE_DUPLICATE_RANGE_ID)
        );
    }
}
