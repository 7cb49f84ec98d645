//! geosave CLI - mirror your GeoGuessr game history from the terminal
//!
//! Each `sync` downloads the games played since the last run into a local
//! folder and advances its `latest.txt` marker.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod destination;
mod error;
mod notify;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::status::run_status;
use crate::commands::sync::run_sync;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "geosave=info,geosave_core=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Sync {
            dir,
            max_pages,
            no_delay,
        } => run_sync(profile, dir, max_pages, no_delay).await?,
        Commands::Status { dir } => run_status(profile, dir).await?,
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Auth { command } => run_auth(command, profile)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
