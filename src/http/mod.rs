//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → middleware/access_gate.rs (exclusions, credential, decision)
//!         → redirect response, or
//!         → shell layout header + server.rs proxy handler → upstream
//! ```

pub mod credential;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use server::{GateServer, ServerError};
