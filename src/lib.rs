//! Route gate: credential-aware redirects and shell classification for
//! web frontends.
//!
//! ```text
//!   Client ──▶ request id ──▶ access gate ──┬─▶ 307 redirect (login / home)
//!                                           │
//!                                           └─▶ shell layout header ──▶ upstream
//! ```

pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GateConfig;
pub use gate::{AccessGate, Decision, Gate, ShellClassifier, ShellLayout};
pub use http::GateServer;
pub use lifecycle::Shutdown;
