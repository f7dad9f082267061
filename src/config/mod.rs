//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → compiled into AccessGate / ShellClassifier / InterceptExclusions
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime rule registration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AccessConfig, CredentialConfig, GateConfig, InterceptConfig, ListenerConfig,
    ObservabilityConfig, ShellConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
