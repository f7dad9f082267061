//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate prefixes and segment patterns
//! - Detect redirect loops between login, home and auth-only routes
//! - Validate socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GateConfig;
use crate::gate::AccessGate;
use crate::routing::{PatternError, SegmentPattern};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: path '{value}' must start with '/'")]
    NotAbsolute { field: &'static str, value: String },

    #[error("{field}: invalid pattern: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: PatternError,
    },

    #[error("access.login_path '{0}' is not public; anonymous users would loop")]
    LoginNotPublic(String),

    #[error("access.home_path '{0}' is auth-only; signed-in users would loop")]
    HomeIsAuthOnly(String),

    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("shell.header_name '{0}' is not a valid header name")]
    InvalidHeaderName(String),

    #[error("access.redirect_param must not be empty")]
    EmptyRedirectParam,
}

pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let path_lists: [(&'static str, &[String]); 5] = [
        ("access.public_prefixes", config.access.public_prefixes.as_slice()),
        ("access.auth_only_prefixes", config.access.auth_only_prefixes.as_slice()),
        ("shell.bare_prefixes", config.shell.bare_prefixes.as_slice()),
        ("intercept.exclude_prefixes", config.intercept.exclude_prefixes.as_slice()),
        ("access.login_path", std::slice::from_ref(&config.access.login_path)),
    ];
    for (field, values) in path_lists {
        for value in values {
            if !value.starts_with('/') {
                errors.push(ValidationError::NotAbsolute {
                    field,
                    value: value.clone(),
                });
            }
        }
    }
    if !config.access.home_path.starts_with('/') {
        errors.push(ValidationError::NotAbsolute {
            field: "access.home_path",
            value: config.access.home_path.clone(),
        });
    }

    for pattern in &config.shell.bare_patterns {
        if let Err(source) = SegmentPattern::parse(pattern) {
            errors.push(ValidationError::InvalidPattern {
                field: "shell.bare_patterns",
                source,
            });
        }
    }

    let access = AccessGate::from_config(&config.access);
    if !access.is_public(&config.access.login_path) {
        errors.push(ValidationError::LoginNotPublic(config.access.login_path.clone()));
    }
    if access.is_auth_only(&config.access.home_path) {
        errors.push(ValidationError::HomeIsAuthOnly(config.access.home_path.clone()));
    }

    if config.access.redirect_param.is_empty() {
        errors.push(ValidationError::EmptyRedirectParam);
    }

    if axum::http::HeaderName::from_bytes(config.shell.header_name.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(config.shell.header_name.clone()));
    }

    let mut addresses = vec![
        ("listener.bind_address", &config.listener.bind_address),
        ("upstream.address", &config.upstream.address),
    ];
    if config.observability.metrics_enabled {
        addresses.push(("observability.metrics_address", &config.observability.metrics_address));
    }
    for (field, value) in addresses {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
