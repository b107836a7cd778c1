//! Origin/Referer allowlist (spec §4.8 "Security middleware on /mcp",
//! §6.2): rejects cross-site browser requests while leaving same-process
//! or CLI clients — which never send either header — untouched.

use http::HeaderMap;

const ALLOWED_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// `true` when no `Origin`/`Referer` header is present, or when the one
/// present names a host in [`ALLOWED_HOSTS`]. `Origin` is preferred over
/// `Referer` when both are present, matching browsers' own precedence.
pub fn is_allowed(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(http::header::ORIGIN).or_else(|| headers.get(http::header::REFERER)) else {
        return true;
    };
    let Ok(value) = value.to_str() else { return false };
    match host_of(value) {
        Some(host) => ALLOWED_HOSTS.contains(&host.as_str()),
        None => false,
    }
}

fn host_of(value: &str) -> Option<String> {
    let without_scheme = value.split("://").nth(1).unwrap_or(value);
    let host_port = without_scheme.split(['/', '?', '#']).next().unwrap_or("");
    if host_port.is_empty() {
        return None;
    }
    let host = if host_port.starts_with('[') {
        host_port.split(']').next().map(|h| h.trim_start_matches('[')).unwrap_or(host_port)
    } else {
        host_port.rsplit_once(':').map(|(h, _)| h).unwrap_or(host_port)
    };
    Some(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_origin(origin: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::ORIGIN, origin.parse().unwrap());
        headers
    }

    #[test]
    fn absent_header_is_allowed() {
        assert!(is_allowed(&HeaderMap::new()));
    }

    #[test]
    fn localhost_origin_is_allowed_scenario_s6() {
        assert!(is_allowed(&headers_with_origin("http://localhost:3000")));
        assert!(is_allowed(&headers_with_origin("http://127.0.0.1:8080")));
    }

    #[test]
    fn ipv6_loopback_is_allowed() {
        assert!(is_allowed(&headers_with_origin("http://[::1]:3000")));
    }

    #[test]
    fn foreign_origin_is_rejected() {
        assert!(!is_allowed(&headers_with_origin("https://evil.example.com")));
    }
}
