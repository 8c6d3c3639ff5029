//! Jenkins job configuration codec
//!
//! This crate converts pipeline definitions to and from the XML job
//! configurations the CI engine stores. It includes:
//! - A small owned XML tree built on `roxmltree`
//! - Codecs for single (no-SCM) and multi-branch pipelines
//! - One codec per SCM branch source
//! - Parameter definitions, crontab classification and the XML version shim

pub mod crontab;
pub mod element;
pub mod error;
pub mod multi_branch;
pub mod no_scm;
pub mod parameter;
pub mod scm;
pub mod version;

pub use crontab::millis_to_cron;
pub use element::{Document, Element};
pub use error::{CodecError, Result};
pub use scm::ScmSourceCodec;
pub use version::rewrite_declared_version;

use devops_core::domain::{PipelineDefinition, PipelineKind};
use devops_core::dto::pipeline::PipelineDefinitionDto;

/// Encode a definition into the job configuration of `project`
pub fn encode(project: &str, definition: &PipelineDefinition) -> Result<String> {
    match definition {
        PipelineDefinition::NoScm(pipeline) => no_scm::encode(pipeline),
        PipelineDefinition::MultiBranch(pipeline) => multi_branch::encode(project, pipeline),
    }
}

/// Validate an API payload and encode it
///
/// Unsupported pipeline or source types fail before any tree is built.
pub fn encode_dto(project: &str, dto: PipelineDefinitionDto) -> Result<String> {
    let definition = PipelineDefinition::try_from(dto)?;
    encode(project, &definition)
}

/// Decode a job configuration, picking the pipeline kind from its root
pub fn decode(xml: &str) -> Result<PipelineDefinition> {
    let document = Document::parse(&version::for_parsing(xml))?;
    let root = document.root();

    match root_kind(root.tag()) {
        Some(PipelineKind::NoScm) => no_scm::decode_root(root).map(PipelineDefinition::NoScm),
        Some(PipelineKind::MultiBranch) => {
            multi_branch::decode_root(root).map(PipelineDefinition::MultiBranch)
        }
        None => Err(CodecError::MissingRoot("can not find pipeline definition")),
    }
}

/// Decode a job configuration stored under the job `name`
///
/// Job names live outside the configuration, so callers that know the name
/// put it back here.
pub fn decode_named(name: &str, xml: &str) -> Result<PipelineDefinition> {
    let mut definition = decode(xml)?;
    match &mut definition {
        PipelineDefinition::NoScm(pipeline) => pipeline.name = name.to_string(),
        PipelineDefinition::MultiBranch(pipeline) => pipeline.name = name.to_string(),
    }
    Ok(definition)
}

fn root_kind(tag: &str) -> Option<PipelineKind> {
    match tag {
        no_scm::ROOT => Some(PipelineKind::NoScm),
        multi_branch::ROOT => Some(PipelineKind::MultiBranch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_core::domain::{
        GitSource, IntervalTrigger, MultiBranchPipeline, NoScmPipeline, ScmSource,
    };

    #[test]
    fn test_decode_picks_kind_from_root() {
        let no_scm = NoScmPipeline {
            jenkinsfile: "node {}".to_string(),
            ..Default::default()
        };
        let xml = encode("demo", &no_scm.clone().into()).unwrap();
        assert_eq!(decode(&xml).unwrap(), PipelineDefinition::NoScm(no_scm));

        let multi = MultiBranchPipeline {
            name: "app".to_string(),
            description: String::new(),
            discarder: None,
            timer_trigger: Some(IntervalTrigger {
                interval: "60000".to_string(),
            }),
            source: ScmSource::Git(GitSource {
                scm_id: "demoapp".to_string(),
                url: "https://git.example.com/app.git".to_string(),
                ..Default::default()
            }),
            script_path: "Jenkinsfile".to_string(),
            multibranch_job_trigger: None,
        };
        let xml = encode("demo", &multi.clone().into()).unwrap();
        let decoded = decode_named("app", &xml).unwrap();
        assert_eq!(decoded.kind(), PipelineKind::MultiBranch);
        assert_eq!(decoded, PipelineDefinition::MultiBranch(multi));
    }

    #[test]
    fn test_decode_named_restores_name() {
        let xml = no_scm::encode(&NoScmPipeline::default()).unwrap();
        assert_eq!(decode_named("nightly", &xml).unwrap().name(), "nightly");
    }

    #[test]
    fn test_decode_unknown_root() {
        let err = decode("<?xml version='1.1' encoding='UTF-8'?>\n<project/>").unwrap_err();
        assert!(matches!(err, CodecError::MissingRoot(_)));
        assert!(err.is_structural());
    }

    #[test]
    fn test_encode_dto_rejects_unknown_source_type() {
        let dto: PipelineDefinitionDto = serde_json::from_str(
            r#"{
                "type": "multi-branch-pipeline",
                "multi_branch_pipeline": {
                    "name": "app",
                    "source_type": "gitlab",
                    "script_path": "Jenkinsfile"
                }
            }"#,
        )
        .unwrap();

        match encode_dto("demo", dto) {
            Err(CodecError::Definition(err)) => {
                assert_eq!(err.to_string(), "unsupported source type: gitlab")
            }
            other => panic!("expected definition error, got {:?}", other),
        }
    }
}
