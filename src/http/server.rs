//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gate middleware and proxy fallback
//! - Wire up middleware (tracing, timeout, request ID)
//! - Forward allowed requests to the upstream frontend
//! - Serve until the shutdown signal fires

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, Scheme},
        HeaderName, Request, StatusCode, Uri, Version,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GateConfig;
use crate::gate::Gate;
use crate::http::middleware::{access_gate_middleware, GateState};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;
use crate::routing::PatternError;

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid gate rules: {0}")]
    Rules(#[from] PatternError),

    #[error("invalid upstream address: {0}")]
    Upstream(#[from] InvalidUri),

    #[error("invalid shell header name: {0}")]
    HeaderName(#[from] axum::http::header::InvalidHeaderName),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Authority,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server fronting the upstream frontend.
pub struct GateServer {
    router: Router,
    config: GateConfig,
}

impl GateServer {
    /// Compile the gate rules and build the router.
    pub fn new(config: GateConfig) -> Result<Self, ServerError> {
        let gate_state = GateState {
            gate: Arc::new(Gate::from_config(&config)?),
            credential: Arc::new(config.credential.clone()),
            shell_header: HeaderName::from_str(&config.shell.header_name)?,
        };

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState {
            upstream: Authority::from_str(&config.upstream.address)?,
            client,
        };

        let router = Self::build_router(&config, state, gate_state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GateConfig, state: AppState, gate_state: GateState) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .layer(middleware::from_fn_with_state(
                gate_state,
                access_gate_middleware,
            ))
            // Registered after the gate layer so probes skip it.
            .route("/_gate/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Consume the server and return its router.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Forwards an allowed request to the upstream frontend.
async fn proxy_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %path_and_query,
        "Forwarding request"
    );

    let uri = match Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(state.upstream.as_str())
        .path_and_query(path_and_query.as_str())
        .build()
    {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            metrics::record_request(400, start_time);
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    *request.uri_mut() = uri;
    *request.version_mut() = Version::HTTP_11;

    match state.client.request(request).await {
        Ok(response) => {
            let response: Response<hyper::body::Incoming> = response;
            metrics::record_request(response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_request(502, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
