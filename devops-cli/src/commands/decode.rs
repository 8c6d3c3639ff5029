//! Decode command handler

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use devops_core::dto::pipeline::PipelineDefinitionDto;

use super::{read_input, write_output};
use crate::config::Config;

/// Decode an XML job configuration into JSON
pub fn handle_decode(
    input: Option<&Path>,
    name: Option<&str>,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let xml = read_input(input)?;

    let definition = match name {
        Some(name) => devops_jenkins::decode_named(name, &xml),
        None => devops_jenkins::decode(&xml),
    }
    .context("Failed to decode job configuration")?;

    tracing::info!(kind = %definition.kind(), "decoded job configuration");

    let kind = definition.kind();
    let dto = PipelineDefinitionDto::from(definition);
    let mut json = if config.compact_json {
        serde_json::to_string(&dto)?
    } else {
        serde_json::to_string_pretty(&dto)?
    };
    json.push('\n');
    write_output(output, &json)?;

    if let Some(path) = output {
        eprintln!(
            "{} Decoded {} to {}",
            "✓".green().bold(),
            kind,
            path.display()
        );
    }

    Ok(())
}
