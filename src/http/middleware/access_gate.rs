//! Access Gate Middleware.
//! Redirects anonymous users to login and signed-in users away from
//! auth-only pages, then tags allowed requests with their shell layout.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::CredentialConfig;
use crate::gate::Gate;
use crate::http::credential::has_credential;
use crate::http::request::request_id;
use crate::observability::metrics;
use crate::routing::canonical_path;

/// State required by the access gate middleware.
#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<Gate>,
    pub credential: Arc<CredentialConfig>,
    pub shell_header: HeaderName,
}

/// Gate a request on its canonical path.
///
/// Dot segments and encoded separators are resolved before any rule runs,
/// and the canonical path replaces the raw one on the forwarded request.
pub async fn access_gate_middleware(
    State(state): State<GateState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Never trust a layout header supplied by the client.
    req.headers_mut().remove(&state.shell_header);

    let path = canonical_path(req.uri().path());
    if path != req.uri().path() {
        match with_path(req.uri(), &path) {
            Ok(uri) => {
                tracing::debug!(
                    request_id = %request_id(req.headers()),
                    raw_path = %req.uri().path(),
                    path = %path,
                    "Canonicalised request path"
                );
                *req.uri_mut() = uri;
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id(req.headers()),
                    error = %e,
                    "Cannot rewrite request path"
                );
                return (StatusCode::BAD_REQUEST, "Invalid request path").into_response();
            }
        }
    }

    if state.gate.exclusions.is_excluded(&path) {
        return next.run(req).await;
    }

    let credential = has_credential(req.headers(), &state.credential);
    let decision = state.gate.access.evaluate(&path, credential);
    metrics::record_decision(decision.label());

    if let Some(location) = state.gate.access.location(&decision) {
        tracing::debug!(
            request_id = %request_id(req.headers()),
            path = %path,
            decision = decision.label(),
            location = %location,
            "Redirecting request"
        );
        return Redirect::temporary(&location).into_response();
    }

    let layout = state.gate.shell.classify(&path);
    req.headers_mut().insert(
        state.shell_header.clone(),
        HeaderValue::from_static(layout.as_str()),
    );
    req.extensions_mut().insert(layout);

    next.run(req).await
}

/// `uri` with its path replaced, query kept.
fn with_path(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse()?);
    Ok(Uri::from_parts(parts)?)
}
