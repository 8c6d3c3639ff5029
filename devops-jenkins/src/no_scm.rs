//! Single pipeline job configuration (`flow-definition`)

use devops_core::domain::{DiscarderProperty, NoScmPipeline, RemoteTrigger, TimerTrigger};

use crate::element::{Document, Element};
use crate::error::{CodecError, Result};
use crate::parameter::{decode_parameters, encode_parameters};
use crate::version;

/// Root element of a pipeline job
pub const ROOT: &str = "flow-definition";

const DECLARATIVE_JOB_ACTION: &str =
    "org.jenkinsci.plugins.pipeline.modeldefinition.actions.DeclarativeJobAction";
const DECLARATIVE_PROPERTY_TRACKER: &str =
    "org.jenkinsci.plugins.pipeline.modeldefinition.actions.DeclarativeJobPropertyTrackerAction";
const DISABLE_CONCURRENT: &str =
    "org.jenkinsci.plugins.workflow.job.properties.DisableConcurrentBuildsJobProperty";
const BUILD_DISCARDER: &str = "jenkins.model.BuildDiscarderProperty";
const PIPELINE_TRIGGERS: &str =
    "org.jenkinsci.plugins.workflow.job.properties.PipelineTriggersJobProperty";
const TIMER_TRIGGER: &str = "hudson.triggers.TimerTrigger";
const CPS_FLOW_DEFINITION: &str = "org.jenkinsci.plugins.workflow.cps.CpsFlowDefinition";

/// Build the job configuration of a single pipeline
pub fn encode(pipeline: &NoScmPipeline) -> Result<String> {
    let mut flow = Element::new(ROOT).with_attr("plugin", "workflow-job");

    let actions = flow.create_child("actions");
    actions
        .create_child(DECLARATIVE_JOB_ACTION)
        .set_attr("plugin", "pipeline-model-definition");
    let tracker = actions
        .create_child(DECLARATIVE_PROPERTY_TRACKER)
        .set_attr("plugin", "pipeline-model-definition");
    for tag in ["jobProperties", "triggers", "parameters", "options"] {
        tracker.create_child(tag);
    }

    flow.create_child("description")
        .set_text(&pipeline.description);

    let properties = flow.create_child("properties");
    if pipeline.disable_concurrent {
        properties.create_child(DISABLE_CONCURRENT);
    }
    if let Some(discarder) = &pipeline.discarder {
        encode_discarder(discarder, properties);
    }
    if let Some(parameters) = pipeline.parameters.as_deref().filter(|p| !p.is_empty()) {
        encode_parameters(parameters, properties);
    }
    if let Some(timer) = &pipeline.timer_trigger {
        properties
            .create_child(PIPELINE_TRIGGERS)
            .create_child("triggers")
            .create_child(TIMER_TRIGGER)
            .create_child("spec")
            .set_text(&timer.cron);
    }

    let definition = flow
        .create_child("definition")
        .set_attr("class", CPS_FLOW_DEFINITION)
        .set_attr("plugin", "workflow-cps");
    definition
        .create_child("script")
        .set_text(&pipeline.jenkinsfile);
    definition.create_child("sandbox").set_text("true");

    flow.create_child("triggers");
    if let Some(remote) = &pipeline.remote_trigger {
        flow.create_child("authToken").set_text(&remote.token);
    }
    flow.create_child("disabled").set_text("false");

    Ok(version::for_emitting(&Document::new(flow).to_xml_string()?))
}

fn encode_discarder(discarder: &DiscarderProperty, properties: &mut Element) {
    let strategy = properties
        .create_child(BUILD_DISCARDER)
        .create_child("strategy")
        .set_attr("class", "hudson.tasks.LogRotator");
    strategy
        .create_child("daysToKeep")
        .set_text(&discarder.days_to_keep);
    strategy
        .create_child("numToKeep")
        .set_text(&discarder.num_to_keep);
    strategy.create_child("artifactDaysToKeep").set_text("-1");
    strategy.create_child("artifactNumToKeep").set_text("-1");
}

/// Read a single pipeline back from its job configuration
///
/// The job name is not part of the configuration, the result has an empty
/// name.
pub fn decode(xml: &str) -> Result<NoScmPipeline> {
    let document = Document::parse(&version::for_parsing(xml))?;
    decode_root(document.root())
}

pub(crate) fn decode_root(flow: &Element) -> Result<NoScmPipeline> {
    if flow.tag() != ROOT {
        return Err(CodecError::MissingRoot("can not find pipeline definition"));
    }

    let mut pipeline = NoScmPipeline {
        description: flow.child_string("description"),
        ..Default::default()
    };

    if let Some(properties) = flow.child("properties") {
        pipeline.disable_concurrent = properties.child(DISABLE_CONCURRENT).is_some();
        // Presence of the block decides, not its values.
        pipeline.discarder = properties.child(BUILD_DISCARDER).map(|discarder| {
            let strategy = discarder.child("strategy");
            DiscarderProperty {
                days_to_keep: strategy
                    .map(|s| s.child_string("daysToKeep"))
                    .unwrap_or_default(),
                num_to_keep: strategy
                    .map(|s| s.child_string("numToKeep"))
                    .unwrap_or_default(),
            }
        });
        pipeline.parameters = decode_parameters(properties);
        pipeline.timer_trigger = properties
            .select_path(&[PIPELINE_TRIGGERS, "triggers", TIMER_TRIGGER])
            .map(|timer| TimerTrigger {
                cron: timer.child_string("spec"),
            });
    }

    pipeline.remote_trigger = flow.child("authToken").map(|token| RemoteTrigger {
        token: token.text().to_string(),
    });
    pipeline.jenkinsfile = flow
        .select_path(&["definition", "script"])
        .map(|script| script.text().to_string())
        .unwrap_or_default();

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_core::domain::{Parameter, ParameterType};

    fn pipeline() -> NoScmPipeline {
        NoScmPipeline {
            name: String::new(),
            description: "nightly build".to_string(),
            discarder: Some(DiscarderProperty {
                days_to_keep: "7".to_string(),
                num_to_keep: "10".to_string(),
            }),
            parameters: Some(vec![
                Parameter {
                    name: "branch".to_string(),
                    description: "branch to build".to_string(),
                    param_type: ParameterType::String,
                    default_value: "main".to_string(),
                },
                Parameter {
                    name: "env".to_string(),
                    description: String::new(),
                    param_type: ParameterType::Choice,
                    default_value: "dev\nprod".to_string(),
                },
            ]),
            disable_concurrent: true,
            timer_trigger: Some(TimerTrigger {
                cron: "H 2 * * *".to_string(),
            }),
            remote_trigger: Some(RemoteTrigger {
                token: "s3cr3t".to_string(),
            }),
            jenkinsfile: "pipeline {\n  agent any\n}".to_string(),
        }
    }

    #[test]
    fn test_full_pipeline_round_trip() {
        let pipeline = pipeline();
        assert_eq!(decode(&encode(&pipeline).unwrap()).unwrap(), pipeline);
    }

    #[test]
    fn test_emitted_document_declares_xml_1_1() {
        let xml = encode(&pipeline()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.1\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<flow-definition plugin=\"workflow-job\">"));
        assert!(xml.contains("<sandbox>true</sandbox>"));
        assert!(xml.contains("<disabled>false</disabled>"));
    }

    #[test]
    fn test_minimal_pipeline_round_trip() {
        let pipeline = NoScmPipeline {
            jenkinsfile: "node { echo 'hi' }".to_string(),
            ..Default::default()
        };

        let xml = encode(&pipeline).unwrap();
        assert!(!xml.contains(DISABLE_CONCURRENT));
        assert!(!xml.contains(BUILD_DISCARDER));
        assert!(!xml.contains("authToken"));
        assert!(!xml.contains("ParametersDefinitionProperty"));
        assert_eq!(decode(&xml).unwrap(), pipeline);
    }

    #[test]
    fn test_discarder_variants_round_trip() {
        for (days, num) in [("", ""), ("3", ""), ("", "5"), ("3", "5")] {
            let pipeline = NoScmPipeline {
                discarder: Some(DiscarderProperty {
                    days_to_keep: days.to_string(),
                    num_to_keep: num.to_string(),
                }),
                ..Default::default()
            };
            assert_eq!(decode(&encode(&pipeline).unwrap()).unwrap(), pipeline);
        }
    }

    #[test]
    fn test_empty_parameter_list_decodes_as_none() {
        let pipeline = NoScmPipeline {
            parameters: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(decode(&encode(&pipeline).unwrap()).unwrap().parameters, None);
    }

    #[test]
    fn test_special_characters_survive() {
        let pipeline = NoScmPipeline {
            description: "build & deploy <prod> \"now\"".to_string(),
            jenkinsfile: "node {\n  sh 'test -f a && echo \"<done>\"'\n}".to_string(),
            ..Default::default()
        };
        assert_eq!(decode(&encode(&pipeline).unwrap()).unwrap(), pipeline);
    }

    #[test]
    fn test_terminal_escapes_fail_to_encode() {
        let pipeline = NoScmPipeline {
            jenkinsfile: "echo '\u{1b}[31mred\u{1b}[0m'".to_string(),
            ..Default::default()
        };

        let err = encode(&pipeline).unwrap_err();
        assert!(matches!(err, CodecError::InvalidCharacter { ch: '\u{1b}', .. }));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_wrong_root_is_structural() {
        let xml = "<?xml version='1.1' encoding='UTF-8'?>\n<project/>";
        let err = decode(xml).unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "can not find pipeline definition");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            decode("<flow-definition>"),
            Err(CodecError::Xml(_))
        ));
    }

    #[test]
    fn test_decode_sparse_document() {
        let xml = r#"<?xml version='1.1' encoding='UTF-8'?>
<flow-definition plugin="workflow-job">
  <description>legacy</description>
  <properties>
    <jenkins.model.BuildDiscarderProperty>
      <strategy class="hudson.tasks.LogRotator">
        <daysToKeep>-1</daysToKeep>
        <numToKeep>-1</numToKeep>
      </strategy>
    </jenkins.model.BuildDiscarderProperty>
  </properties>
</flow-definition>"#;

        let pipeline = decode(xml).unwrap();
        assert_eq!(pipeline.description, "legacy");
        assert_eq!(
            pipeline.discarder,
            Some(DiscarderProperty {
                days_to_keep: "-1".to_string(),
                num_to_keep: "-1".to_string(),
            })
        );
        assert!(pipeline.timer_trigger.is_none());
        assert!(pipeline.remote_trigger.is_none());
        assert_eq!(pipeline.jenkinsfile, "");
    }
}
