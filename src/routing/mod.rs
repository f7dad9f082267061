//! Path matching subsystem.
//!
//! # Data Flow
//! ```text
//! Rule compilation (at startup):
//!     prefix / pattern strings from GateConfig
//!     → matcher.rs (PathPrefix, SegmentPattern, ExtensionMatcher)
//!     → owned by AccessGate, ShellClassifier, InterceptExclusions
//!
//! Per request:
//!     request path → path.rs (canonical form) → PathMatcher::matches → bool
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always yields the same answer

pub mod matcher;
pub mod path;

pub use matcher::{
    any_prefix_matches, AnyMatcher, ExtensionMatcher, PathMatcher, PathPrefix, PatternError,
    SegmentPattern,
};
pub use path::canonical_path;
