//! Request path canonicalisation.
//!
//! Rules are matched against the canonical path, and the canonical path is
//! what gets forwarded, so `/login/../dashboard` is judged as `/dashboard`.

/// Canonical form of a request path.
///
/// - `%2e` decodes to `.`; `%2f`, `%5c` and `\` become `/`
/// - `.` segments and empty segments are dropped
/// - `..` removes the previous segment and never climbs above the root
/// - A trailing `/` is kept when the resolved path is not the root
///
/// Other percent escapes are left untouched.
pub fn canonical_path(path: &str) -> String {
    let decoded = decode_separators(path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut canonical = String::with_capacity(decoded.len());
    for segment in &segments {
        canonical.push('/');
        canonical.push_str(segment);
    }
    if canonical.is_empty() {
        return "/".to_string();
    }

    let last = decoded.rsplit('/').next().unwrap_or_default();
    if decoded.ends_with('/') || last == "." {
        canonical.push('/');
    }
    canonical
}

fn decode_separators(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = String::with_capacity(path.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let escape = (
                bytes[i + 1].to_ascii_lowercase(),
                bytes[i + 2].to_ascii_lowercase(),
            );
            let decoded = match escape {
                (b'2', b'e') => Some('.'),
                (b'2', b'f') | (b'5', b'c') => Some('/'),
                _ => None,
            };
            if let Some(c) = decoded {
                out.push(c);
                i += 3;
                continue;
            }
        }
        let c = path[i..].chars().next().unwrap_or_default();
        out.push(if c == '\\' { '/' } else { c });
        i += c.len_utf8();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_paths_unchanged() {
        for path in ["/", "/dashboard", "/login/", "/worker/contracts/abc123", "/a%20b"] {
            assert_eq!(canonical_path(path), path);
        }
    }

    #[test]
    fn test_dot_segments_resolved() {
        assert_eq!(canonical_path("/login/../dashboard"), "/dashboard");
        assert_eq!(canonical_path("/_next/static/../settings"), "/settings");
        assert_eq!(canonical_path("/./terms/./x"), "/terms/x");
        assert_eq!(canonical_path("/terms/x/."), "/terms/x/");
        assert_eq!(canonical_path("/terms/.."), "/");
    }

    #[test]
    fn test_dot_dot_never_climbs_above_root() {
        assert_eq!(canonical_path("/../../admin"), "/admin");
    }

    #[test]
    fn test_encoded_dots_and_slashes_decoded() {
        assert_eq!(canonical_path("/terms/%2e%2e/admin"), "/admin");
        assert_eq!(canonical_path("/terms/%2E%2E/admin/users"), "/admin/users");
        assert_eq!(canonical_path("/consent/..%2fsettings"), "/settings");
        assert_eq!(canonical_path("/consent/..%5Csettings"), "/settings");
        assert_eq!(canonical_path("/consent\\..\\settings"), "/settings");
    }

    #[test]
    fn test_empty_segments_collapsed() {
        assert_eq!(canonical_path("//dashboard"), "/dashboard");
        assert_eq!(canonical_path("/login//../dashboard"), "/dashboard");
    }

    #[test]
    fn test_truncated_escape_kept() {
        assert_eq!(canonical_path("/x%2"), "/x%2");
        assert_eq!(canonical_path("/x%"), "/x%");
    }
}
