//! Address and network parsing.
//!
//! Networks are strict: `address/prefix` is required and host bits below the
//! prefix must be zero. Both inputs are trimmed before parsing.

use ipnet::IpNet;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("empty network")]
    Empty,

    #[error("missing prefix length (expected address/prefix)")]
    MissingPrefix,

    #[error("invalid network address: {0}")]
    InvalidAddress(String),

    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),

    #[error("prefix length {prefix} exceeds {max} for this address family")]
    PrefixOutOfRange { prefix: u8, max: u8 },

    #[error("host bits set (network address is {0})")]
    HostBitsSet(IpNet),
}

/// Parse an IPv4 or IPv6 literal. Empty or malformed input yields `None`.
pub fn parse_address(raw: &str) -> Option<IpAddr> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

pub fn parse_network(raw: &str) -> Result<IpNet, CidrError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CidrError::Empty);
    }

    let (addr, prefix) = trimmed.split_once('/').ok_or(CidrError::MissingPrefix)?;

    let addr: IpAddr = addr
        .parse()
        .map_err(|_| CidrError::InvalidAddress(addr.to_string()))?;

    // `u8::from_str` would accept a leading `+`.
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CidrError::InvalidPrefix(prefix.to_string()));
    }
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| CidrError::InvalidPrefix(prefix.to_string()))?;

    let max = max_prefix_len(&addr);
    let net = IpNet::new(addr, prefix).map_err(|_| CidrError::PrefixOutOfRange { prefix, max })?;

    let network = net.trunc();
    if network != net {
        return Err(CidrError::HostBitsSet(network));
    }
    Ok(net)
}

/// Two blocks overlap when they share at least one address. For CIDR blocks that
/// means one contains the other. Different families never overlap.
pub fn overlaps(a: &IpNet, b: &IpNet) -> bool {
    a.contains(b) || b.contains(a)
}

fn max_prefix_len(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}
