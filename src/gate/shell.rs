//! Shell classification: should a page render inside the app chrome?
//!
//! Pages entered from outside the authenticated app (login, API calls,
//! consent and entry links, a single shared contract) render full-bleed.

use crate::config::ShellConfig;
use crate::routing::{any_prefix_matches, PathMatcher, PathPrefix, PatternError, SegmentPattern};

/// Layout verdict forwarded to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellLayout {
    Shell,
    Bare,
}

impl ShellLayout {
    /// Header value sent to the upstream.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellLayout::Shell => "shell",
            ShellLayout::Bare => "bare",
        }
    }
}

/// Decides whether a path renders inside the navigation shell.
#[derive(Debug, Clone)]
pub struct ShellClassifier {
    bare_prefixes: Vec<PathPrefix>,
    bare_patterns: Vec<SegmentPattern>,
}

impl ShellClassifier {
    /// Compile bare prefixes and patterns. Fails on a malformed pattern.
    pub fn from_config(config: &ShellConfig) -> Result<Self, PatternError> {
        let bare_patterns = config
            .bare_patterns
            .iter()
            .map(|p| SegmentPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bare_prefixes: config.bare_prefixes.iter().map(PathPrefix::new).collect(),
            bare_patterns,
        })
    }

    /// False for bare prefixes and patterns, true for everything else.
    pub fn should_wrap_in_shell(&self, path: &str) -> bool {
        !(any_prefix_matches(&self.bare_prefixes, path)
            || self.bare_patterns.iter().any(|p| p.matches(path)))
    }

    /// [`Self::should_wrap_in_shell`] as a [`ShellLayout`].
    pub fn classify(&self, path: &str) -> ShellLayout {
        if self.should_wrap_in_shell(path) {
            ShellLayout::Shell
        } else {
            ShellLayout::Bare
        }
    }
}
