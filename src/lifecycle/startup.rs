//! Startup orchestration.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::GateConfig;
use crate::http::GateServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Start the gate and serve until a termination signal arrives.
pub async fn start(config: GateConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.access.dev_bypass {
        tracing::warn!("Development bypass enabled: every request is allowed without a credential");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        public_prefixes = config.access.public_prefixes.len(),
        auth_only_prefixes = config.access.auth_only_prefixes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = GateServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
