//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod cron;
mod decode;
mod encode;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Encode a JSON pipeline definition into a job configuration
    Encode {
        /// JSON definition file, stdin when omitted
        input: Option<PathBuf>,

        /// Write the XML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a job configuration into a JSON pipeline definition
    Decode {
        /// XML job configuration, stdin when omitted
        input: Option<PathBuf>,

        /// Job name, not stored in the configuration itself
        #[arg(short, long)]
        name: Option<String>,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the crontab a scan interval is scheduled with
    Cron {
        /// Scan interval in milliseconds
        #[arg(allow_negative_numbers = true)]
        millis: i64,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Encode { input, output } => {
            encode::handle_encode(input.as_deref(), output.as_deref(), config)
        }
        Commands::Decode {
            input,
            name,
            output,
        } => decode::handle_decode(input.as_deref(), name.as_deref(), output.as_deref(), config),
        Commands::Cron { millis } => cron::handle_cron(millis),
    }
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Write to a file, or stdout when no path is given
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write stdout")
        }
    }
}
