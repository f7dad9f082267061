//! Paths the gate never intercepts (static assets, image optimizer,
//! favicon, manifest). Compiled once into a single matcher.

use crate::config::InterceptConfig;
use crate::routing::{AnyMatcher, ExtensionMatcher, PathMatcher, PathPrefix};

/// Compiled exclusion list, checked before the access gate.
#[derive(Debug)]
pub struct InterceptExclusions {
    matcher: AnyMatcher,
}

impl InterceptExclusions {
    pub fn from_config(config: &InterceptConfig) -> Self {
        let mut matcher = AnyMatcher::default();
        for prefix in &config.exclude_prefixes {
            matcher.push(PathPrefix::new(prefix));
        }
        if !config.exclude_extensions.is_empty() {
            matcher.push(ExtensionMatcher::new(&config.exclude_extensions));
        }
        Self { matcher }
    }

    /// True if the gate must let `path` through untouched.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}
