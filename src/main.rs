//! Inventory telemetry server
//!
//! Serves health, metrics and alert endpoints for the inventory service

#![allow(missing_docs)]

use clap::Parser;
use inventory_telemetry::config::Config;
use inventory_telemetry::server;
use inventory_telemetry::utils::logging::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "telemetry-server", version, about)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "TELEMETRY_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

async fn load_config(args: &Args) -> inventory_telemetry::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.json_logs {
        config.logging.json = true;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::builder::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
