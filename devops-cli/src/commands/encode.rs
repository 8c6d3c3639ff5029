//! Encode command handler

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use devops_core::domain::PipelineDefinition;
use devops_core::dto::pipeline::PipelineDefinitionDto;

use super::{read_input, write_output};
use crate::config::Config;

/// Encode a JSON definition into XML
pub fn handle_encode(input: Option<&Path>, output: Option<&Path>, config: &Config) -> Result<()> {
    let json = read_input(input)?;
    let dto: PipelineDefinitionDto =
        serde_json::from_str(&json).context("Failed to parse pipeline definition JSON")?;
    let definition =
        PipelineDefinition::try_from(dto).context("Invalid pipeline definition")?;

    let project = match &definition {
        PipelineDefinition::MultiBranch(_) => config.require_project()?,
        PipelineDefinition::NoScm(_) => config.project.as_str(),
    };

    tracing::info!(
        kind = %definition.kind(),
        name = definition.name(),
        project,
        "encoding pipeline"
    );

    let xml = devops_jenkins::encode(project, &definition)
        .with_context(|| format!("Failed to encode pipeline `{}`", definition.name()))?;
    write_output(output, &xml)?;

    if let Some(path) = output {
        eprintln!(
            "{} Encoded {} {} to {}",
            "✓".green().bold(),
            definition.kind(),
            definition.name().cyan(),
            path.display()
        );
    }

    Ok(())
}
