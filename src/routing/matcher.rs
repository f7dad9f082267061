//! Path matching logic.
//!
//! # Responsibilities
//! - Match path prefixes on `/` segment boundaries
//! - Match single-segment dynamic patterns (`/worker/contracts/{id}`)
//! - Match file extensions of the last segment
//! - Combine matchers with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Comparison is segment by segment, never raw string prefixes,
//!   so `/login` does not match `/login2`
//! - No regex to guarantee O(n) matching

use thiserror::Error;

/// Trait for matching request paths against conditions.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path equal to the prefix or nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix {
    prefix: String,
}

impl PathPrefix {
    /// Create a new prefix matcher.
    /// Trailing slashes are dropped so `/api/` behaves like `/api`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        Self { prefix }
    }

    /// The normalized prefix.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}

impl PathMatcher for PathPrefix {
    fn matches(&self, path: &str) -> bool {
        let mut segments = path.split('/');
        self.prefix
            .split('/')
            .all(|expected| segments.next() == Some(expected))
    }
}

/// True if any prefix matches the path.
pub fn any_prefix_matches(prefixes: &[PathPrefix], path: &str) -> bool {
    prefixes.iter().any(|prefix| prefix.matches(path))
}

/// Errors raised when compiling a segment pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("pattern '{0}' has an empty wildcard name")]
    EmptyWildcard(String),

    #[error("pattern '{0}' has an unbalanced brace")]
    UnbalancedBrace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard,
}

/// Literal segments plus wildcard segments, matched segment for segment.
///
/// `/worker/contracts/{id}` matches `/worker/contracts/abc123` but not
/// `/worker/contracts/abc/def` or `/worker/contracts/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPattern {
    source: String,
    segments: Vec<Segment>,
}

impl SegmentPattern {
    /// Compile a pattern. Wildcards are written `{name}` or `*`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::NotAbsolute(pattern.to_string()))?;

        let segments = rest
            .split('/')
            .map(|segment| {
                if segment == "*" {
                    return Ok(Segment::Wildcard);
                }
                match (segment.strip_prefix('{'), segment.ends_with('}')) {
                    (Some(inner), true) => {
                        let name = &inner[..inner.len() - 1];
                        if name.is_empty() {
                            Err(PatternError::EmptyWildcard(pattern.to_string()))
                        } else if name.contains(['{', '}']) {
                            Err(PatternError::UnbalancedBrace(pattern.to_string()))
                        } else {
                            Ok(Segment::Wildcard)
                        }
                    }
                    _ if segment.contains(['{', '}']) => {
                        Err(PatternError::UnbalancedBrace(pattern.to_string()))
                    }
                    _ => Ok(Segment::Literal(segment.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written in config.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PathMatcher for SegmentPattern {
    fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };

        let mut actual = rest.split('/');
        for expected in &self.segments {
            match (expected, actual.next()) {
                (Segment::Literal(lit), Some(seg)) if lit == seg => {}
                (Segment::Wildcard, Some(seg)) if !seg.is_empty() => {}
                _ => return false,
            }
        }
        actual.next().is_none()
    }
}

/// Matches paths whose final segment ends in one of the given extensions.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    extensions: Vec<String>,
}

impl ExtensionMatcher {
    /// Extensions are compared case-insensitively, with or without a leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }
}

impl PathMatcher for ExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        let last = path.rsplit('/').next().unwrap_or_default();
        match last.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            _ => false,
        }
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn PathMatcher>>,
}

impl AnyMatcher {
    /// Create a matcher from boxed conditions.
    pub fn new(matchers: Vec<Box<dyn PathMatcher>>) -> Self {
        Self { matchers }
    }

    /// Add one more condition.
    pub fn push(&mut self, matcher: impl PathMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }
}

impl PathMatcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_exact_and_nested() {
        let prefix = PathPrefix::new("/login");
        assert!(prefix.matches("/login"));
        assert!(prefix.matches("/login/"));
        assert!(prefix.matches("/login/reset"));
    }

    #[test]
    fn test_prefix_respects_segment_boundary() {
        let prefix = PathPrefix::new("/login");
        assert!(!prefix.matches("/login2"));
        assert!(!prefix.matches("/loginX/reset"));
        assert!(!prefix.matches("/log"));
        assert!(!prefix.matches("/"));
    }

    #[test]
    fn test_prefix_trailing_slash_normalized() {
        let prefix = PathPrefix::new("/api/");
        assert_eq!(prefix.as_str(), "/api");
        assert!(prefix.matches("/api/users"));
        assert!(!prefix.matches("/apix"));
    }

    #[test]
    fn test_root_prefix_matches_only_root() {
        let root = PathPrefix::new("/");
        assert!(root.matches("/"));
        assert!(!root.matches("/dashboard"));
    }

    #[test]
    fn test_multi_segment_prefix() {
        let prefix = PathPrefix::new("/worker/consent");
        assert!(prefix.matches("/worker/consent/42"));
        assert!(!prefix.matches("/worker"));
        assert!(!prefix.matches("/worker/consents"));
    }

    #[test]
    fn test_pattern_single_wildcard() {
        let pattern = SegmentPattern::parse("/worker/contracts/{id}").unwrap();
        assert!(pattern.matches("/worker/contracts/abc123"));
        assert!(!pattern.matches("/worker/contracts/abc/def"));
        assert!(!pattern.matches("/worker/contracts/"));
        assert!(!pattern.matches("/worker/contracts"));
        assert!(!pattern.matches("/worker/contract/abc"));
    }

    #[test]
    fn test_pattern_star_wildcard() {
        let pattern = SegmentPattern::parse("/share/*/view").unwrap();
        assert!(pattern.matches("/share/x9/view"));
        assert!(!pattern.matches("/share//view"));
    }

    #[test]
    fn test_pattern_parse_errors() {
        assert_eq!(
            SegmentPattern::parse("worker/{id}"),
            Err(PatternError::NotAbsolute("worker/{id}".into()))
        );
        assert_eq!(
            SegmentPattern::parse("/worker/{}"),
            Err(PatternError::EmptyWildcard("/worker/{}".into()))
        );
        assert_eq!(
            SegmentPattern::parse("/worker/{id"),
            Err(PatternError::UnbalancedBrace("/worker/{id".into()))
        );
    }

    #[test]
    fn test_extension_matcher() {
        let matcher = ExtensionMatcher::new([".PNG", "svg"]);
        assert!(matcher.matches("/images/logo.png"));
        assert!(matcher.matches("/icon.SVG"));
        assert!(!matcher.matches("/images/logo.png/edit"));
        assert!(!matcher.matches("/.png"));
        assert!(!matcher.matches("/report.pdf"));
    }

    #[test]
    fn test_any_matcher() {
        let mut any = AnyMatcher::default();
        assert!(!any.matches("/x"));
        any.push(PathPrefix::new("/_next/static"));
        any.push(ExtensionMatcher::new(["ico"]));
        assert!(any.matches("/_next/static/chunk.js"));
        assert!(any.matches("/favicon.ico"));
        assert!(!any.matches("/dashboard"));
    }
}
