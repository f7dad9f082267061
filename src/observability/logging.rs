//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! this crate and to `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

pub fn default_filter(config: &ObservabilityConfig) -> String {
    format!(
        "route_gate={level},tower_http={level}",
        level = config.log_level
    )
}

pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
