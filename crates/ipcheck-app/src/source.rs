//! Source address resolution from request metadata.

/// Request metadata a host has about the caller.
#[derive(Clone, Debug, Default)]
pub struct SourceInput {
    /// Address of the TCP peer.
    pub peer: Option<String>,
    /// Raw `X-Forwarded-For` header value.
    pub forwarded_for: Option<String>,
    /// Raw `X-Real-IP` header value.
    pub real_ip: Option<String>,
}

/// Pick the address to evaluate.
///
/// Proxy headers are only consulted when `trust_proxy_headers` is set: the
/// first non-empty `X-Forwarded-For` entry, then `X-Real-IP`, then the peer.
/// The result is not validated here; an unparseable value is reported by the
/// gate as unresolvable.
pub fn resolve_source_address(input: &SourceInput, trust_proxy_headers: bool) -> Option<String> {
    fn non_empty(v: &str) -> Option<String> {
        let v = v.trim();
        (!v.is_empty()).then(|| v.to_string())
    }

    if trust_proxy_headers {
        if let Some(ip) = input
            .forwarded_for
            .as_deref()
            .and_then(|h| h.split(',').find_map(non_empty))
        {
            return Some(ip);
        }
        if let Some(ip) = input.real_ip.as_deref().and_then(non_empty) {
            return Some(ip);
        }
    }
    input.peer.as_deref().and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(peer: Option<&str>, xff: Option<&str>, real: Option<&str>) -> SourceInput {
        SourceInput {
            peer: peer.map(str::to_string),
            forwarded_for: xff.map(str::to_string),
            real_ip: real.map(str::to_string),
        }
    }

    #[test]
    fn forwarded_for_takes_first_entry() {
        let src = input(
            Some("172.160.0.1"),
            Some("192.168.1.100, 10.0.0.1"),
            Some("10.9.9.9"),
        );
        assert_eq!(
            resolve_source_address(&src, true).as_deref(),
            Some("192.168.1.100")
        );
    }

    #[test]
    fn blank_forwarded_entries_are_skipped() {
        let src = input(None, Some(" , 10.0.0.7"), None);
        assert_eq!(resolve_source_address(&src, true).as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn real_ip_then_peer() {
        let src = input(Some("172.160.0.1"), Some("  "), Some(" 10.9.9.9 "));
        assert_eq!(resolve_source_address(&src, true).as_deref(), Some("10.9.9.9"));

        let src = input(Some("172.160.0.1"), None, None);
        assert_eq!(
            resolve_source_address(&src, true).as_deref(),
            Some("172.160.0.1")
        );
    }

    #[test]
    fn headers_ignored_unless_trusted() {
        let src = input(Some("172.160.0.1"), Some("192.168.1.100"), Some("10.9.9.9"));
        assert_eq!(
            resolve_source_address(&src, false).as_deref(),
            Some("172.160.0.1")
        );
        assert_eq!(resolve_source_address(&SourceInput::default(), true), None);
    }
}
