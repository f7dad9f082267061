use std::path::PathBuf;

use clap::Parser;

use route_gate::config::{load_config, GateConfig};
use route_gate::lifecycle;
use route_gate::observability::logging;

#[derive(Parser)]
#[command(name = "route-gate")]
#[command(about = "Credential-aware route gate in front of a web frontend", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("route-gate v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
