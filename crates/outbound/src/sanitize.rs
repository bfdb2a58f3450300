//! Helpers for sanitizing feed locations before they enter log records and
//! tracing span attributes.
//!
//! Published spreadsheet URLs embed the document key in the path and often
//! carry tokens in the query string, so neither is ever logged verbatim.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Reduces a feed location to something safe to log.
///
/// - `https://user:pw@docs.google.com/spreadsheets/d/KEY/pub?output=csv`
///   → `https://docs.google.com/****`
/// - `https://example.com/` → `https://example.com/`
/// - `file:///srv/feeds/outbound.csv` → `outbound.csv`
/// - `/srv/feeds/outbound.csv` → `outbound.csv`
pub fn redact_url(location: &str) -> String {
    if let Some(path) = location.strip_prefix("file://") {
        return redact_path(Path::new(path));
    }

    let Some(scheme_end) = location.find("://") else {
        return redact_path(Path::new(location));
    };

    let scheme = &location[..scheme_end + 3];
    let rest = &location[scheme_end + 3..];
    let authority_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let tail = &rest[authority_end..];

    if tail.is_empty() || tail == "/" {
        format!("{}{}{}", scheme, host, tail)
    } else {
        format!("{}{}/****", scheme, host)
    }
}

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Short deterministic hash of a feed location, for correlating log lines
/// about the same feed without exposing it.
pub fn hash_location(location: &str) -> String {
    let mut hasher = DefaultHasher::new();
    location.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_strips_path_and_query() {
        assert_eq!(
            redact_url("https://docs.google.com/spreadsheets/d/e/KEY/pub?gid=0&output=csv"),
            "https://docs.google.com/****"
        );
    }

    #[test]
    fn test_redact_url_strips_userinfo() {
        assert_eq!(
            redact_url("https://token@feeds.example.com/outbound.csv"),
            "https://feeds.example.com/****"
        );
    }

    #[test]
    fn test_redact_url_bare_host_unchanged() {
        assert_eq!(redact_url("https://example.com/"), "https://example.com/");
        assert_eq!(redact_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_redact_url_query_only() {
        assert_eq!(
            redact_url("https://example.com?key=secret"),
            "https://example.com/****"
        );
    }

    #[test]
    fn test_redact_url_file_locations() {
        assert_eq!(redact_url("file:///srv/feeds/outbound.csv"), "outbound.csv");
        assert_eq!(redact_url("/srv/feeds/outbound.csv"), "outbound.csv");
    }

    #[test]
    fn test_redact_path_no_filename() {
        assert_eq!(redact_path(Path::new("/")), "<unknown>");
    }

    #[test]
    fn test_hash_location_deterministic() {
        let h1 = hash_location("https://example.com/feed.csv");
        let h2 = hash_location("https://example.com/feed.csv");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 16);
        assert_ne!(h1, hash_location("https://example.com/other.csv"));
    }
}
