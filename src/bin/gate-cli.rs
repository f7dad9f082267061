use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use route_gate::config::{load_config, GateConfig};
use route_gate::gate::Gate;

#[derive(Parser)]
#[command(name = "gate-cli")]
#[command(about = "Evaluate route-gate rules without running the server", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the access decision for a path
    Check {
        path: String,
        /// Evaluate as a signed-in user
        #[arg(long)]
        credential: bool,
    },
    /// Show whether a path renders inside the app shell
    Shell { path: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };
    let gate = Gate::from_config(&config)?;

    let output = match cli.command {
        Commands::Check { path, credential } => {
            let excluded = gate.exclusions.is_excluded(&path);
            let decision = gate.access.evaluate(&path, credential);
            json!({
                "path": path,
                "credential": credential,
                "excluded": excluded,
                "decision": if excluded { "allow" } else { decision.label() },
                "location": if excluded { None } else { gate.access.location(&decision) },
            })
        }
        Commands::Shell { path } => {
            let layout = gate.shell.classify(&path);
            json!({
                "path": path,
                "wrap_in_shell": gate.shell.should_wrap_in_shell(&path),
                "layout": layout.as_str(),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
