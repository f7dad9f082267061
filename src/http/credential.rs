//! Credential presence detection.
//!
//! Only presence is checked. The token value is never parsed, validated
//! or logged.

use axum::http::{header, HeaderMap};

use crate::config::CredentialConfig;

/// True when a configured cookie, or an accepted bearer header, carries a
/// non-empty token.
pub fn has_credential(headers: &HeaderMap, config: &CredentialConfig) -> bool {
    has_cookie(headers, &config.cookie_names) || (config.accept_bearer && has_bearer(headers))
}

fn has_cookie(headers: &HeaderMap, names: &[String]) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| !value.trim().is_empty() && names.iter().any(|n| n == name.trim()))
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let scheme = value.get(..7)?;
            scheme
                .eq_ignore_ascii_case("bearer ")
                .then(|| &value[7..])
        })
        .is_some_and(|token| !token.trim().is_empty())
}
