use std::path::PathBuf;
use std::process::ExitCode;

use ago_config::Config;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod state;

#[cfg(test)]
mod tests;

use self::commands::Command;
use self::state::AppState;

/// Learn the vocabulary of the documents you read
#[derive(Parser)]
#[command(name = "ago", version)]
struct Cli {
    /// Storage directory (defaults to $AGO_HOME or ~/.ago)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };
    Ok(match &cli.data_dir {
        Some(dir) => config.with_data_dir(dir.clone()),
        None => config,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[err] {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli).context("failed to load configuration")?;
    tracing::debug!("using storage at {}", config.storage.data_dir.display());

    let mut state = AppState::new(config)?;
    commands::dispatch(&mut state, cli.command).await
}
