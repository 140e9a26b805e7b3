//! bugby - bug-tracking REST backend

#![allow(missing_docs)]

use bugby_rs::utils::logging::init_logging;
use bugby_rs::{Config, Result, server};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bugby", version, about = "Bug-tracking REST backend")]
struct Cli {
    /// YAML configuration file; the environment is used when it does not exist
    #[arg(short, long, env = "BUGBY_CONFIG", default_value = "config/bugby.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).await?;
    init_logging(&config.logging)?;

    if cli.config.exists() {
        info!("Configuration loaded from {:?}", cli.config);
    } else {
        info!("No configuration file at {:?}, using environment", cli.config);
    }

    server::builder::run_server(config).await
}

async fn load_config(cli: &Cli) -> Result<Config> {
    if cli.config.exists() {
        Config::from_file(&cli.config).await
    } else {
        Config::from_env()
    }
}
