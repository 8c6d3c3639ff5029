//! Bitbucket Server branch source

use devops_core::domain::BitbucketServerSource;

use super::ScmSourceCodec;
use super::traits::{self, TRAITS};
use crate::element::Element;

const BRANCH_DISCOVERY_TRAIT: &str = "com.cloudbees.jenkins.plugins.bitbucket.BranchDiscoveryTrait";
const ORIGIN_PR_TRAIT: &str =
    "com.cloudbees.jenkins.plugins.bitbucket.OriginPullRequestDiscoveryTrait";
const FORK_PR_TRAIT: &str = "com.cloudbees.jenkins.plugins.bitbucket.ForkPullRequestDiscoveryTrait";

impl ScmSourceCodec for BitbucketServerSource {
    const CLASS: &'static str = "com.cloudbees.jenkins.plugins.bitbucket.BitbucketSCMSource";
    const PLUGIN: &'static str = "cloudbees-bitbucket-branch-source";

    fn encode_fields(&self, scm_id: &str, source: &mut Element) {
        source.create_child("id").set_text(scm_id);
        source
            .create_child("credentialsId")
            .set_text(&self.credential_id);
        source.create_child("repoOwner").set_text(&self.owner);
        source.create_child("repository").set_text(&self.repo);
        source.create_child("serverUrl").set_text(&self.api_uri);

        let container = source.create_child(TRAITS);
        if self.discover_branches != 0 {
            traits::encode_strategy(container, BRANCH_DISCOVERY_TRAIT, self.discover_branches);
        }
        if self.discover_pr_from_origin != 0 {
            traits::encode_strategy(container, ORIGIN_PR_TRAIT, self.discover_pr_from_origin);
        }
        if let Some(forks) = &self.discover_pr_from_forks {
            traits::encode_fork_discovery(container, FORK_PR_TRAIT, FORK_PR_TRAIT, forks);
        }
        traits::encode_common(container, self.clone_option.as_ref(), &self.regex_filter);
    }

    fn decode(source: &Element) -> Self {
        let mut bitbucket = BitbucketServerSource {
            scm_id: source.child_string("id"),
            owner: source.child_string("repoOwner"),
            repo: source.child_string("repository"),
            credential_id: source.child_string("credentialsId"),
            api_uri: source.child_string("serverUrl"),
            ..Default::default()
        };

        if let Some(container) = source.child(TRAITS) {
            bitbucket.discover_branches =
                traits::decode_strategy(container, BRANCH_DISCOVERY_TRAIT);
            bitbucket.discover_pr_from_origin = traits::decode_strategy(container, ORIGIN_PR_TRAIT);
            bitbucket.discover_pr_from_forks =
                traits::decode_fork_discovery(container, FORK_PR_TRAIT);
            bitbucket.clone_option = traits::decode_clone_option(container);
            bitbucket.regex_filter = traits::decode_regex_filter(container);
        }

        bitbucket
    }
}
