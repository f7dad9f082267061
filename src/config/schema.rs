//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Frontend server that allowed requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Public and auth-only route rules plus redirect targets.
    pub access: AccessConfig,

    /// Where the credential token is read from.
    pub credential: CredentialConfig,

    /// Paths rendered without the navigation shell.
    pub shell: ShellConfig,

    /// Paths never intercepted by the gate (static assets).
    pub intercept: InterceptConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream frontend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Access gate rules.
///
/// Prefixes match a path when equal to it or when the path continues with
/// a `/` after the prefix. A path matched by no public prefix requires a
/// credential.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Prefixes reachable without a credential.
    pub public_prefixes: Vec<String>,

    /// Prefixes an authenticated user is sent away from (login screens).
    pub auth_only_prefixes: Vec<String>,

    /// Login surface for anonymous users.
    pub login_path: String,

    /// Landing page for authenticated users hitting an auth-only route.
    pub home_path: String,

    /// Query parameter carrying the original path on login redirects.
    pub redirect_param: String,

    /// Allow every request unconditionally. Local development only.
    pub dev_bypass: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            public_prefixes: vec![
                "/login".to_string(),
                "/consent".to_string(),
                "/entry".to_string(),
                "/terms".to_string(),
                "/privacy".to_string(),
            ],
            auth_only_prefixes: vec!["/login".to_string()],
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            redirect_param: "redirect".to_string(),
            dev_bypass: false,
        }
    }
}

/// Credential extraction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Cookie names that carry the session token.
    pub cookie_names: Vec<String>,

    /// Also accept `Authorization: Bearer <token>`.
    pub accept_bearer: bool,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            cookie_names: vec!["access_token".to_string()],
            accept_bearer: false,
        }
    }
}

/// Shell classification rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prefixes (and everything nested under them) rendered bare.
    pub bare_prefixes: Vec<String>,

    /// Segment patterns rendered bare, e.g. `/worker/contracts/{id}`.
    pub bare_patterns: Vec<String>,

    /// Request header carrying the layout verdict to the upstream.
    pub header_name: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            bare_prefixes: vec![
                "/login".to_string(),
                "/api".to_string(),
                "/consent".to_string(),
                "/entry".to_string(),
            ],
            bare_patterns: vec!["/worker/contracts/{id}".to_string()],
            header_name: "x-shell-layout".to_string(),
        }
    }
}

/// Interception exclusions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InterceptConfig {
    /// Prefixes passed straight through to the upstream.
    pub exclude_prefixes: Vec<String>,

    /// File extensions (without the dot) passed straight through.
    pub exclude_extensions: Vec<String>,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            exclude_prefixes: vec![
                "/_next/static".to_string(),
                "/_next/image".to_string(),
                "/favicon.ico".to_string(),
                "/manifest.json".to_string(),
            ],
            exclude_extensions: ["png", "jpg", "jpeg", "svg", "gif", "webp", "ico"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
