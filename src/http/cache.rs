//! HTTP cache validation module
//!
//! Provides `ETag`/`Last-Modified` validators derived from file metadata and
//! conditional request evaluation. No caching policy headers are emitted.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::fs::Metadata;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Validators for a single file response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Quoted `ETag`, e.g. `"1f3a9c"`
    pub etag: String,
    /// Modification time truncated to whole seconds
    pub last_modified: Option<DateTime<Utc>>,
}

impl Validators {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self::new(metadata.len(), metadata.modified().ok())
    }

    pub fn new(len: u64, modified: Option<SystemTime>) -> Self {
        let last_modified = modified
            .map(DateTime::<Utc>::from)
            .and_then(|t| DateTime::from_timestamp(t.timestamp(), 0));
        Self {
            etag: generate_etag(len, last_modified),
            last_modified,
        }
    }

    /// `Last-Modified` header value in IMF-fixdate form
    pub fn last_modified_header(&self) -> Option<String> {
        self.last_modified.map(format_http_date)
    }
}

/// Generate `ETag` from size and modification time
///
/// Hashing metadata instead of content keeps large files streamable.
pub fn generate_etag(len: u64, modified: Option<DateTime<Utc>>) -> String {
    let mut hasher = DefaultHasher::new();
    len.hash(&mut hasher);
    modified.map(|t| t.timestamp()).hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Weak comparison: `W/"abc123"`
/// - Wildcard: `*`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').any(|e| {
            let e = e.trim();
            e == "*" || e.strip_prefix("W/").unwrap_or(e) == etag
        })
    })
}

/// Whether the request can be answered with 304 Not Modified
///
/// `If-None-Match` takes precedence; `If-Modified-Since` is only consulted
/// when it is absent.
pub fn is_not_modified(
    if_none_match: Option<&str>,
    if_modified_since: Option<&str>,
    validators: &Validators,
) -> bool {
    if if_none_match.is_some() {
        return check_etag_match(if_none_match, &validators.etag);
    }
    match (if_modified_since.and_then(parse_http_date), validators.last_modified) {
        (Some(since), Some(modified)) => modified <= since,
        _ => false,
    }
}

/// Whether a Range header may be honoured given the `If-Range` precondition
pub fn range_applies(if_range: Option<&str>, validators: &Validators) -> bool {
    let Some(if_range) = if_range.map(str::trim) else {
        return true;
    };
    if if_range.starts_with('"') {
        // Strong comparison only
        return if_range == validators.etag;
    }
    if if_range.starts_with("W/") {
        return false;
    }
    match (parse_http_date(if_range), validators.last_modified) {
        (Some(date), Some(modified)) => date == modified,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn fixed() -> Validators {
        // 1994-11-06T08:49:37Z
        Validators::new(42, Some(UNIX_EPOCH + Duration::from_secs(784_111_777)))
    }

    #[test]
    fn test_generate_etag() {
        let etag = fixed().etag;
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_consistency() {
        assert_eq!(fixed().etag, fixed().etag);
        let other = Validators::new(43, Some(UNIX_EPOCH + Duration::from_secs(784_111_777)));
        assert_ne!(fixed().etag, other.etag);
    }

    #[test]
    fn test_sub_second_mtime_is_truncated() {
        let a = Validators::new(1, Some(UNIX_EPOCH + Duration::from_millis(5_000_100)));
        let b = Validators::new(1, Some(UNIX_EPOCH + Duration::from_millis(5_000_900)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_http_date_round_trip() {
        let v = fixed();
        let header = v.last_modified_header().unwrap();
        assert_eq!(header, "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(parse_http_date(&header), v.last_modified);
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_is_not_modified() {
        let v = fixed();
        assert!(is_not_modified(Some(&v.etag), None, &v));
        assert!(is_not_modified(None, Some("Sun, 06 Nov 1994 08:49:37 GMT"), &v));
        assert!(is_not_modified(None, Some("Mon, 07 Nov 1994 00:00:00 GMT"), &v));
        assert!(!is_not_modified(None, Some("Sat, 05 Nov 1994 00:00:00 GMT"), &v));
        assert!(!is_not_modified(None, Some("not a date"), &v));
        // If-None-Match wins over If-Modified-Since
        assert!(!is_not_modified(
            Some("\"other\""),
            Some("Mon, 07 Nov 1994 00:00:00 GMT"),
            &v
        ));
        assert!(!is_not_modified(None, None, &v));
    }

    #[test]
    fn test_range_applies() {
        let v = fixed();
        assert!(range_applies(None, &v));
        assert!(range_applies(Some(&v.etag), &v));
        assert!(!range_applies(Some("\"stale\""), &v));
        assert!(!range_applies(Some(&format!("W/{}", v.etag)), &v));
        assert!(range_applies(Some("Sun, 06 Nov 1994 08:49:37 GMT"), &v));
        assert!(!range_applies(Some("Mon, 07 Nov 1994 00:00:00 GMT"), &v));
    }
}
