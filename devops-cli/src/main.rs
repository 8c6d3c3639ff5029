//! DevOps CLI
//!
//! Command-line interface for converting pipeline definitions to and from
//! Jenkins job configurations.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "devops")]
#[command(about = "Jenkins pipeline configuration codec", long_about = None)]
struct Cli {
    /// Project the pipelines belong to, prefixed to SCM source ids
    #[arg(long, env = "DEVOPS_PROJECT", default_value = "")]
    project: String,

    /// Print JSON on a single line
    #[arg(long, env = "DEVOPS_COMPACT_JSON")]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries documents only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devops=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        project: cli.project,
        compact_json: cli.compact,
    };
    config.validate()?;

    handle_command(cli.command, &config)
}
