//! Multi-branch project configuration

use devops_core::domain::{
    DiscarderProperty, IntervalTrigger, MultiBranchJobTrigger, MultiBranchPipeline,
};

use crate::crontab::millis_to_cron;
use crate::element::{Document, Element};
use crate::error::{CodecError, Result};
use crate::scm::{decode_source, encode_source};
use crate::version;

/// Root element of a multi-branch project
pub const ROOT: &str = "org.jenkinsci.plugins.workflow.multibranch.WorkflowMultiBranchProject";

const FOLDER_CONFIG: &str = "org.jenkinsci.plugins.pipeline.modeldefinition.config.FolderConfig";
const WORST_CHILD_HEALTH: &str =
    "com.cloudbees.hudson.plugins.folder.health.WorstChildHealthMetric";
const JOB_TRIGGER_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.multibranch.PipelineTriggerProperty";
const ORPHANED_ITEM_STRATEGY: &str =
    "com.cloudbees.hudson.plugins.folder.computed.DefaultOrphanedItemStrategy";
const PERIODIC_FOLDER_TRIGGER: &str =
    "com.cloudbees.hudson.plugins.folder.computed.PeriodicFolderTrigger";
const BRANCH_SOURCE: &str = "jenkins.branch.BranchSource";
const BRANCH_PROPERTY_STRATEGY: &str = "jenkins.branch.NamedExceptionsBranchPropertyStrategy";
const BRANCH_PROJECT_FACTORY: &str =
    "org.jenkinsci.plugins.workflow.multibranch.WorkflowBranchProjectFactory";

/// Back reference to the project, used by views, icon, sources and factory
fn owner() -> Element {
    Element::new("owner")
        .with_attr("class", ROOT)
        .with_attr("reference", "../..")
}

/// Fixed part of every project: actions, folder config, views, health, icon
fn skeleton() -> Element {
    let mut project = Element::new(ROOT).with_attr("plugin", "workflow-multibranch");
    project.create_child("actions");

    let folder_config = project
        .create_child("properties")
        .create_child(FOLDER_CONFIG)
        .set_attr("plugin", "pipeline-model-definition");
    folder_config.create_child("dockerLabel");
    folder_config
        .create_child("registry")
        .set_attr("plugin", "docker-commons");

    project
        .create_child("folderViews")
        .set_attr("class", "jenkins.branch.MultiBranchProjectViewHolder")
        .set_attr("plugin", "branch-api")
        .push_child(owner());

    project
        .create_child("healthMetrics")
        .create_child(WORST_CHILD_HEALTH)
        .set_attr("plugin", "cloudbees-folder")
        .create_child("nonRecursive")
        .set_text("false");

    project
        .create_child("icon")
        .set_attr("class", "jenkins.branch.MetadataActionFolderIcon")
        .set_attr("plugin", "branch-api")
        .push_child(owner());

    project
}

/// Build the configuration of a multi-branch project
///
/// The branch source is stamped with the identity `project + name`.
pub fn encode(project_name: &str, pipeline: &MultiBranchPipeline) -> Result<String> {
    let mut project = skeleton();
    project
        .create_child("description")
        .set_text(&pipeline.description);

    if let Some(trigger) = &pipeline.multibranch_job_trigger {
        encode_job_trigger(trigger, &mut project);
    }

    if let Some(discarder) = &pipeline.discarder {
        let strategy = project
            .create_child("orphanedItemStrategy")
            .set_attr("class", ORPHANED_ITEM_STRATEGY)
            .set_attr("plugin", "cloudbees-folder");
        strategy.create_child("pruneDeadBranches").set_text("true");
        strategy
            .create_child("daysToKeep")
            .set_text(&discarder.days_to_keep);
        strategy
            .create_child("numToKeep")
            .set_text(&discarder.num_to_keep);
    }

    let triggers = project.create_child("triggers");
    if let Some(timer) = &pipeline.timer_trigger {
        let millis: i64 =
            timer
                .interval
                .trim()
                .parse()
                .map_err(|source| CodecError::InvalidInterval {
                    value: timer.interval.clone(),
                    source,
                })?;
        let periodic = triggers
            .create_child(PERIODIC_FOLDER_TRIGGER)
            .set_attr("plugin", "cloudbees-folder");
        periodic.create_child("spec").set_text(millis_to_cron(millis));
        periodic.create_child("interval").set_text(&timer.interval);
        triggers.create_child("disabled").set_text("false");
    }

    let sources = project
        .create_child("sources")
        .set_attr("class", "jenkins.branch.MultiBranchProject$BranchSourceList")
        .set_attr("plugin", "branch-api");
    sources.push_child(owner());

    let branch_source = sources.create_child("data").create_child(BRANCH_SOURCE);
    let strategy = branch_source
        .create_child("strategy")
        .set_attr("class", BRANCH_PROPERTY_STRATEGY);
    strategy
        .create_child("defaultProperties")
        .set_attr("class", "empty-list");
    strategy
        .create_child("namedExceptions")
        .set_attr("class", "empty-list");
    encode_source(
        &pipeline.source,
        &pipeline.scm_id(project_name),
        branch_source.create_child("source"),
    );

    let factory = project
        .create_child("factory")
        .set_attr("class", BRANCH_PROJECT_FACTORY);
    factory.push_child(owner());
    factory
        .create_child("scriptPath")
        .set_text(&pipeline.script_path);

    Ok(version::for_emitting(&Document::new(project).to_xml_string()?))
}

fn encode_job_trigger(trigger: &MultiBranchJobTrigger, project: &mut Element) {
    let Some(properties) = project.child_mut("properties") else {
        return;
    };
    let property = properties
        .create_child(JOB_TRIGGER_PROPERTY)
        .set_attr("plugin", "multibranch-action-triggers");
    property
        .create_child("createActionJobsToTrigger")
        .set_text(&trigger.create_action_jobs_to_trigger);
    property
        .create_child("deleteActionJobsToTrigger")
        .set_text(&trigger.delete_action_jobs_to_trigger);
}

/// Read a multi-branch project back from its configuration
///
/// The source kind comes from the class of the branch source. As with
/// single pipelines the name is not recoverable and is left empty.
pub fn decode(xml: &str) -> Result<MultiBranchPipeline> {
    let document = Document::parse(&version::for_parsing(xml))?;
    decode_root(document.root())
}

pub(crate) fn decode_root(project: &Element) -> Result<MultiBranchPipeline> {
    if project.tag() != ROOT {
        return Err(CodecError::MissingRoot(
            "can not parse multi-branch pipeline config",
        ));
    }

    let source = project
        .select_path(&["sources", "data", BRANCH_SOURCE, "source"])
        .ok_or(CodecError::MissingSource)?;
    let source = decode_source(source)?;

    let multibranch_job_trigger = project
        .select_path(&["properties", JOB_TRIGGER_PROPERTY])
        .map(|property| MultiBranchJobTrigger {
            create_action_jobs_to_trigger: property.child_string("createActionJobsToTrigger"),
            delete_action_jobs_to_trigger: property.child_string("deleteActionJobsToTrigger"),
        });

    let discarder = project
        .child("orphanedItemStrategy")
        .map(|strategy| DiscarderProperty {
            days_to_keep: strategy.child_string("daysToKeep"),
            num_to_keep: strategy.child_string("numToKeep"),
        });

    let timer_trigger = project
        .select_path(&["triggers", PERIODIC_FOLDER_TRIGGER])
        .map(|periodic| IntervalTrigger {
            interval: periodic.child_string("interval"),
        });

    Ok(MultiBranchPipeline {
        name: String::new(),
        description: project.child_string("description"),
        discarder,
        timer_trigger,
        source,
        script_path: project
            .select_path(&["factory", "scriptPath"])
            .map(|path| path.text().to_string())
            .unwrap_or_default(),
        multibranch_job_trigger,
    })
}
