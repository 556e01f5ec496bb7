use crate::matcher;
use crate::model::{Actor, Location, LocationId};
use ipcheck_types::{AccessDecision, Action, AllowBasis, DenyReason};
use std::collections::BTreeMap;

/// Process-wide policy parameters, resolved by the host's configuration store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Global switch. Disabled by default.
    pub checking_enabled: bool,
}

/// Read access to the host's location records for the duration of one
/// evaluation.
pub trait LocationDirectory {
    fn location(&self, id: LocationId) -> Option<&Location>;
}

impl LocationDirectory for BTreeMap<LocationId, Location> {
    fn location(&self, id: LocationId) -> Option<&Location> {
        self.get(&id)
    }
}

impl LocationDirectory for [Location] {
    fn location(&self, id: LocationId) -> Option<&Location> {
        self.iter().find(|l| l.id == id)
    }
}

/// Outcome of the switch/bypass steps, before any address is looked at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckRequirement<'a> {
    Exempt(AllowBasis),
    Required(&'a Location),
    /// The actor points at a location the directory does not know.
    UnknownLocation(LocationId),
}

/// Composes the global switch, the location switch, the actor bypass, and range
/// membership into one decision.
pub struct PolicyResolver<'a, D: ?Sized> {
    config: PolicyConfig,
    directory: &'a D,
}

impl<'a, D: LocationDirectory + ?Sized> PolicyResolver<'a, D> {
    pub fn new(config: PolicyConfig, directory: &'a D) -> Self {
        Self { config, directory }
    }

    pub fn directory(&self) -> &'a D {
        self.directory
    }

    /// Steps 1-4 of the decision order: global switch, location reference,
    /// location switch, bypass.
    pub fn requirement(&self, actor: &Actor) -> CheckRequirement<'a> {
        if !self.config.checking_enabled {
            return CheckRequirement::Exempt(AllowBasis::ChecksDisabled);
        }

        let Some(location_id) = actor.location else {
            return CheckRequirement::Exempt(AllowBasis::NoLocation);
        };

        match self.directory.location(location_id) {
            Some(location) if !location.check_enabled() => {
                CheckRequirement::Exempt(AllowBasis::LocationCheckDisabled)
            }
            // Bypass exempts whether or not the location could be resolved.
            _ if actor.bypass => CheckRequirement::Exempt(AllowBasis::Bypass),
            Some(location) => CheckRequirement::Required(location),
            None => CheckRequirement::UnknownLocation(location_id),
        }
    }

    pub fn is_check_required(&self, actor: &Actor) -> bool {
        !matches!(self.requirement(actor), CheckRequirement::Exempt(_))
    }

    /// Evaluate one (actor, action, source address) triple.
    ///
    /// `action` only feeds diagnostics; both actions share the same path.
    pub fn evaluate(&self, actor: &Actor, action: Action, source: Option<&str>) -> AccessDecision {
        let location = match self.requirement(actor) {
            CheckRequirement::Exempt(basis) => {
                tracing::debug!(
                    actor = actor.id.0,
                    action = action.as_str(),
                    basis = ?basis,
                    "range check not required"
                );
                return AccessDecision::allow(basis);
            }
            CheckRequirement::UnknownLocation(id) => {
                tracing::error!(
                    actor = actor.id.0,
                    location = id.0,
                    "actor references an unknown location"
                );
                return AccessDecision::deny(
                    DenyReason::NoActiveRanges,
                    format!("location {id} not found"),
                );
            }
            CheckRequirement::Required(location) => location,
        };

        let Some(address) = source.map(str::trim).filter(|s| !s.is_empty()) else {
            return AccessDecision::deny(DenyReason::UnresolvableAddress, "no source address");
        };

        let decision = matcher::is_member(address, location.ranges());
        match &decision {
            AccessDecision::Allow {
                basis: AllowBasis::Matched { cidr, .. },
            } => tracing::info!(
                ip = address,
                cidr = %cidr,
                location = %location.name,
                "address matched network range"
            ),
            AccessDecision::Deny {
                reason: DenyReason::NoActiveRanges,
                ..
            } => tracing::error!(
                location = %location.name,
                "no active network ranges for location"
            ),
            _ => {}
        }
        decision
    }
}
