use crate::error::DenyError;
use crate::model::Actor;
use crate::policy::{LocationDirectory, PolicyConfig, PolicyResolver};
use ipcheck_types::{AccessDecision, Action, AllowBasis, DenyReason};

/// Pre-commit hook called by the host before a check-in is created or a
/// check-in/check-out timestamp is modified.
///
/// Pure: repeated calls with the same inputs give the same outcome and no record
/// is touched.
pub struct AccessGate<'a, D: ?Sized> {
    resolver: PolicyResolver<'a, D>,
}

impl<'a, D: LocationDirectory + ?Sized> AccessGate<'a, D> {
    pub fn new(config: PolicyConfig, directory: &'a D) -> Self {
        Self {
            resolver: PolicyResolver::new(config, directory),
        }
    }

    pub fn authorize(
        &self,
        actor: &Actor,
        action: Action,
        source: Option<&str>,
    ) -> Result<AllowBasis, DenyError> {
        match self.resolver.evaluate(actor, action, source) {
            AccessDecision::Allow { basis } => Ok(basis),
            AccessDecision::Deny { reason, detail } => {
                let message = self.deny_message(actor, action, source, reason);
                tracing::warn!(
                    actor = actor.id.0,
                    action = action.as_str(),
                    reason = reason.as_str(),
                    detail = %detail,
                    "attendance action denied"
                );
                Err(DenyError { reason, message })
            }
        }
    }

    fn deny_message(
        &self,
        actor: &Actor,
        action: Action,
        source: Option<&str>,
        reason: DenyReason,
    ) -> String {
        let address = source.map(str::trim).filter(|s| !s.is_empty());
        let location = match actor.location {
            Some(id) => match self.resolver.directory().location(id) {
                Some(l) => l.name.clone(),
                None => format!("{id}"),
            },
            None => String::new(),
        };

        match (reason, address) {
            (DenyReason::UnresolvableAddress, None) => {
                format!("Unable to determine IP address for {action} operation")
            }
            (DenyReason::UnresolvableAddress, Some(addr)) => {
                format!("Invalid IP address format: {addr} ({action})")
            }
            (DenyReason::AddressNotMember, Some(addr)) => {
                format!("IP {addr} not allowed for {action} at {location}")
            }
            (DenyReason::AddressNotMember, None) => {
                format!("IP not allowed for {action} at {location}")
            }
            (DenyReason::NoActiveRanges, _) => {
                format!("No active network ranges defined for location {location} ({action})")
            }
        }
    }
}
