//! Conditional request helpers
//!
//! `ETag` generation, `If-None-Match` evaluation, and single-part Range
//! parsing for the file-serving handlers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content using fast hashing
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server `ETag`
///
/// Handles a single `ETag`, a comma-separated list, and the `*` wildcard.
/// Returns true when the cached copy is current (respond 304).
pub fn if_none_match_hits(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client.split(',').any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// A parsed byte range, bounds resolved against the file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    #[cfg(test)]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Range header evaluation result
#[derive(Debug)]
pub enum RangeOutcome {
    /// Serve the requested slice with 206
    Partial(ByteRange),
    /// Start lies beyond the file, respond 416
    NotSatisfiable,
    /// No Range header, multi-part, or malformed: serve the full file
    Full,
}

/// Evaluate an HTTP Range header against a file of `file_size` bytes
///
/// Only the `bytes` unit and single ranges are supported, per the subset
/// browsers and the Confluence iframe host actually send:
/// - `bytes=start-end`
/// - `bytes=start-`
/// - `bytes=-suffix`
pub fn evaluate_range(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Full;
    };
    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Full;
    };
    if spec.contains(',') || file_size == 0 {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // Suffix form: "-500" means the last 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 {
            return RangeOutcome::NotSatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        e.min(file_size - 1)
    };

    if start > end {
        return RangeOutcome::NotSatisfiable;
    }
    RangeOutcome::Partial(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_shape_and_consistency() {
        let etag = etag_for(b"editor bundle");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, etag_for(b"editor bundle"));
        assert_ne!(etag, etag_for(b"renderer bundle"));
    }

    #[test]
    fn test_if_none_match() {
        let etag = "\"abc123\"";
        assert!(if_none_match_hits(Some("\"abc123\""), etag));
        assert!(if_none_match_hits(Some("\"zzz\", \"abc123\""), etag));
        assert!(if_none_match_hits(Some("*"), etag));
        assert!(!if_none_match_hits(Some("\"other\""), etag));
        assert!(!if_none_match_hits(None, etag));
    }

    #[test]
    fn test_range_standard() {
        match evaluate_range(Some("bytes=0-9"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 0, end: 9 });
                assert_eq!(r.len(), 10);
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_range_open_ended() {
        match evaluate_range(Some("bytes=50-"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 50, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_range_suffix() {
        match evaluate_range(Some("bytes=-20"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 80, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_range_not_satisfiable() {
        assert!(matches!(
            evaluate_range(Some("bytes=200-"), 100),
            RangeOutcome::NotSatisfiable
        ));
        assert!(matches!(
            evaluate_range(Some("bytes=-0"), 100),
            RangeOutcome::NotSatisfiable
        ));
    }

    #[test]
    fn test_range_ignored_forms() {
        assert!(matches!(evaluate_range(None, 100), RangeOutcome::Full));
        assert!(matches!(
            evaluate_range(Some("bytes=a-b"), 100),
            RangeOutcome::Full
        ));
        assert!(matches!(
            evaluate_range(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Full
        ));
        assert!(matches!(
            evaluate_range(Some("items=0-9"), 100),
            RangeOutcome::Full
        ));
    }
}
