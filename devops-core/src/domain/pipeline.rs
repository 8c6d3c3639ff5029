//! Pipeline domain types

use serde::{Deserialize, Serialize};

use super::parameter::Parameter;
use super::scm::{ScmSource, SourceType};

/// A pipeline definition the CI engine can host
///
/// Exactly one payload exists per kind, so the discriminant and the payload
/// cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineDefinition {
    /// Single pipeline with an inline script
    NoScm(NoScmPipeline),
    /// Branch-source pipeline discovering branches from one SCM
    MultiBranch(MultiBranchPipeline),
}

impl PipelineDefinition {
    /// Pipeline name, regardless of kind
    pub fn name(&self) -> &str {
        match self {
            PipelineDefinition::NoScm(pipeline) => &pipeline.name,
            PipelineDefinition::MultiBranch(pipeline) => &pipeline.name,
        }
    }

    /// Discriminator of this definition
    pub fn kind(&self) -> PipelineKind {
        match self {
            PipelineDefinition::NoScm(_) => PipelineKind::NoScm,
            PipelineDefinition::MultiBranch(_) => PipelineKind::MultiBranch,
        }
    }
}

impl From<NoScmPipeline> for PipelineDefinition {
    fn from(pipeline: NoScmPipeline) -> Self {
        PipelineDefinition::NoScm(pipeline)
    }
}

impl From<MultiBranchPipeline> for PipelineDefinition {
    fn from(pipeline: MultiBranchPipeline) -> Self {
        PipelineDefinition::MultiBranch(pipeline)
    }
}

/// Pipeline kind as exchanged with the management API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    NoScm,
    MultiBranch,
}

impl PipelineKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::NoScm => "pipeline",
            PipelineKind::MultiBranch => "multi-branch-pipeline",
        }
    }
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PipelineKind {
    type Err = crate::DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipeline" => Ok(PipelineKind::NoScm),
            "multi-branch-pipeline" => Ok(PipelineKind::MultiBranch),
            other => Err(crate::DefinitionError::UnsupportedPipelineType(
                other.to_string(),
            )),
        }
    }
}

/// Single pipeline with an inline Jenkinsfile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoScmPipeline {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discarder: Option<DiscarderProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(default)]
    pub disable_concurrent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_trigger: Option<TimerTrigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_trigger: Option<RemoteTrigger>,
    #[serde(default)]
    pub jenkinsfile: String,
}

/// Pipeline whose branches are discovered from a single SCM source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiBranchPipeline {
    pub name: String,
    pub description: String,
    pub discarder: Option<DiscarderProperty>,
    pub timer_trigger: Option<IntervalTrigger>,
    pub source: ScmSource,
    pub script_path: String,
    pub multibranch_job_trigger: Option<MultiBranchJobTrigger>,
}

impl MultiBranchPipeline {
    /// Source kind, derived from the populated source
    pub fn source_type(&self) -> SourceType {
        self.source.source_type()
    }

    /// Identity stamped into the SCM source for a given project
    pub fn scm_id(&self, project: &str) -> String {
        format!("{}{}", project, self.name)
    }
}

/// Build retention policy
///
/// Empty strings mean "unlimited". Both values are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscarderProperty {
    #[serde(default)]
    pub days_to_keep: String,
    #[serde(default)]
    pub num_to_keep: String,
}

/// Cron based trigger of a no-SCM pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTrigger {
    #[serde(default)]
    pub cron: String,
}

/// Periodic branch scan of a multi-branch pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalTrigger {
    /// Scan interval in milliseconds
    #[serde(default)]
    pub interval: String,
}

/// Token allowing the pipeline to be triggered remotely
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrigger {
    #[serde(default)]
    pub token: String,
}

/// Pipelines to run when a branch is created or deleted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiBranchJobTrigger {
    #[serde(default, rename = "create_action_job_to_trigger")]
    pub create_action_jobs_to_trigger: String,
    #[serde(default, rename = "delete_action_job_to_trigger")]
    pub delete_action_jobs_to_trigger: String,
}
