//! Core domain types
//!
//! This module contains the pipeline definition structures shared between the
//! management API (JSON) and the job configuration codec (XML).

pub mod parameter;
pub mod pipeline;
pub mod scm;

pub use parameter::{Parameter, ParameterType};
pub use pipeline::{
    DiscarderProperty, IntervalTrigger, MultiBranchJobTrigger, MultiBranchPipeline,
    NoScmPipeline, PipelineDefinition, PipelineKind, RemoteTrigger, TimerTrigger,
};
pub use scm::{
    BitbucketForkTrust, BitbucketServerSource, CloneOption, DiscoverPrFromForks, GitHubForkTrust,
    GitHubSource, GitSource, ScmSource, SingleSvnSource, SourceType, SvnSource,
};
