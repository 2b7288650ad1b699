//! Syntactic URL check applied before a URL is shortened.
//!
//! This is a heuristic, not RFC 3986 validation. It rejects input without a
//! `//` separator, with embedded whitespace, or without a host that is either
//! `localhost` or has a dotted tail.

use regex::Regex;
use std::sync::LazyLock;

static PROTOCOL_AND_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\w+:)?//(\S+)$").expect("valid regex"));
static LOCALHOST_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^localhost[:?\d]*(?:[^:?\d]\S*)?$").expect("valid regex"));
static NON_LOCALHOST_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s.]+\.\S{2,}$").expect("valid regex"));

/// Returns whether `candidate` is acceptable as an absolute URL to shorten.
pub fn is_valid(candidate: &str) -> bool {
    let Some(captures) = PROTOCOL_AND_DOMAIN.captures(candidate) else {
        return false;
    };

    let Some(rest) = captures.get(1).map(|m| m.as_str()) else {
        return false;
    };

    LOCALHOST_DOMAIN.is_match(rest) || NON_LOCALHOST_DOMAIN.is_match(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_urls() {
        assert!(is_valid("https://example.com"));
        assert!(is_valid("http://example.com/page?q=1#frag"));
        assert!(is_valid("https://sub.example.co.uk/a/b"));
    }

    #[test]
    fn accepts_localhost_with_port_and_path() {
        assert!(is_valid("ftp://localhost:8080/x"));
        assert!(is_valid("http://localhost"));
        assert!(is_valid("http://localhost:3000"));
        assert!(is_valid("http://localhost/path"));
    }

    #[test]
    fn scheme_is_optional_but_separator_is_not() {
        assert!(is_valid("//example.com"));
        assert!(!is_valid("example.com"));
        assert!(!is_valid("https:example.com"));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!is_valid("not a url"));
        assert!(!is_valid("https://exa mple.com"));
        assert!(!is_valid("https://example.com "));
    }

    #[test]
    fn rejects_missing_host() {
        assert!(!is_valid("//nodomainhere"));
        assert!(!is_valid("http://a"));
        assert!(!is_valid("https://"));
        assert!(!is_valid(""));
    }

    #[test]
    fn rejects_short_domain_tail() {
        assert!(!is_valid("http://example.c"));
        assert!(!is_valid("http://.com"));
    }

    #[test]
    fn localhost_accepts_query_after_port() {
        assert!(is_valid("http://localhost:8080?q=1"));
        assert!(is_valid("http://localhost?debug"));
    }
}
