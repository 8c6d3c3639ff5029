//! Pipeline DTOs exchanged with the management API

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{
    DiscarderProperty, IntervalTrigger, MultiBranchJobTrigger, MultiBranchPipeline,
    NoScmPipeline, PipelineDefinition, PipelineKind,
};
use crate::domain::scm::{
    BitbucketServerSource, GitHubSource, GitSource, ScmSource, SingleSvnSource, SourceType,
    SvnSource,
};
use crate::{DefinitionError, Result};

/// Pipeline definition as sent by the management API
///
/// `type` selects which of the two payloads is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinitionDto {
    #[serde(rename = "type")]
    pub pipeline_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<NoScmPipeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_branch_pipeline: Option<MultiBranchPipelineDto>,
}

/// Multi-branch pipeline with a string discriminated SCM source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiBranchPipelineDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discarder: Option<DiscarderProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_trigger: Option<IntervalTrigger>,
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_source: Option<GitSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_source: Option<GitHubSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svn_source: Option<SvnSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_svn_source: Option<SingleSvnSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitbucket_server_source: Option<BitbucketServerSource>,
    #[serde(default)]
    pub script_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multibranch_job_trigger: Option<MultiBranchJobTrigger>,
}

impl TryFrom<PipelineDefinitionDto> for PipelineDefinition {
    type Error = DefinitionError;

    fn try_from(dto: PipelineDefinitionDto) -> Result<Self> {
        match dto.pipeline_type.parse::<PipelineKind>()? {
            PipelineKind::NoScm => dto
                .pipeline
                .map(PipelineDefinition::NoScm)
                .ok_or(DefinitionError::MissingPayload {
                    expected: "pipeline",
                }),
            PipelineKind::MultiBranch => {
                let pipeline = dto
                    .multi_branch_pipeline
                    .ok_or(DefinitionError::MissingPayload {
                        expected: "multi_branch_pipeline",
                    })?;
                Ok(PipelineDefinition::MultiBranch(pipeline.try_into()?))
            }
        }
    }
}

impl From<PipelineDefinition> for PipelineDefinitionDto {
    fn from(definition: PipelineDefinition) -> Self {
        let pipeline_type = definition.kind().as_str().to_string();
        match definition {
            PipelineDefinition::NoScm(pipeline) => Self {
                pipeline_type,
                pipeline: Some(pipeline),
                multi_branch_pipeline: None,
            },
            PipelineDefinition::MultiBranch(pipeline) => Self {
                pipeline_type,
                pipeline: None,
                multi_branch_pipeline: Some(pipeline.into()),
            },
        }
    }
}

impl TryFrom<MultiBranchPipelineDto> for MultiBranchPipeline {
    type Error = DefinitionError;

    fn try_from(dto: MultiBranchPipelineDto) -> Result<Self> {
        // Payloads of other kinds are ignored, only the selected one counts.
        let source_type = dto.source_type.parse::<SourceType>()?;
        let source = match source_type {
            SourceType::Git => dto.git_source.map(ScmSource::Git),
            SourceType::GitHub => dto.github_source.map(ScmSource::GitHub),
            SourceType::Svn => dto.svn_source.map(ScmSource::Svn),
            SourceType::SingleSvn => dto.single_svn_source.map(ScmSource::SingleSvn),
            SourceType::BitbucketServer => {
                dto.bitbucket_server_source.map(ScmSource::BitbucketServer)
            }
        };
        let source = source.ok_or_else(|| DefinitionError::MissingPayload {
            expected: payload_field(source_type),
        })?;

        Ok(MultiBranchPipeline {
            name: dto.name,
            description: dto.description,
            discarder: dto.discarder,
            timer_trigger: dto.timer_trigger,
            source,
            script_path: dto.script_path,
            multibranch_job_trigger: dto.multibranch_job_trigger,
        })
    }
}

impl From<MultiBranchPipeline> for MultiBranchPipelineDto {
    fn from(pipeline: MultiBranchPipeline) -> Self {
        let mut dto = Self {
            name: pipeline.name,
            description: pipeline.description,
            discarder: pipeline.discarder,
            timer_trigger: pipeline.timer_trigger,
            source_type: pipeline.source.source_type().as_str().to_string(),
            script_path: pipeline.script_path,
            multibranch_job_trigger: pipeline.multibranch_job_trigger,
            ..Default::default()
        };
        match pipeline.source {
            ScmSource::Git(source) => dto.git_source = Some(source),
            ScmSource::GitHub(source) => dto.github_source = Some(source),
            ScmSource::Svn(source) => dto.svn_source = Some(source),
            ScmSource::SingleSvn(source) => dto.single_svn_source = Some(source),
            ScmSource::BitbucketServer(source) => dto.bitbucket_server_source = Some(source),
        }
        dto
    }
}

/// JSON field carrying the payload of a source type
fn payload_field(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::Git => "git_source",
        SourceType::GitHub => "github_source",
        SourceType::Svn => "svn_source",
        SourceType::SingleSvn => "single_svn_source",
        SourceType::BitbucketServer => "bitbucket_server_source",
    }
}
