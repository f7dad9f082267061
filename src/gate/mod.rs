//! Request gating subsystem.
//!
//! # Data Flow
//! ```text
//! Request path (+ credential presence)
//!     → exclusion.rs (static assets skip the gate entirely)
//!     → access.rs (allow / redirect to login / redirect home)
//!     → shell.rs (wrap in app chrome or render bare)
//! ```
//!
//! # Design Decisions
//! - Pure functions of (path, credential, config); no hidden state
//! - Rules compiled once at startup and shared via Arc
//! - Fail closed: unknown paths require a credential

pub mod access;
pub mod exclusion;
pub mod shell;

pub use access::{AccessGate, Decision};
pub use exclusion::InterceptExclusions;
pub use shell::{ShellClassifier, ShellLayout};

use crate::config::GateConfig;
use crate::routing::PatternError;

/// All compiled gate rules for one configuration.
#[derive(Debug)]
pub struct Gate {
    pub access: AccessGate,
    pub shell: ShellClassifier,
    pub exclusions: InterceptExclusions,
}

impl Gate {
    pub fn from_config(config: &GateConfig) -> Result<Self, PatternError> {
        Ok(Self {
            access: AccessGate::from_config(&config.access),
            shell: ShellClassifier::from_config(&config.shell)?,
            exclusions: InterceptExclusions::from_config(&config.intercept),
        })
    }
}
