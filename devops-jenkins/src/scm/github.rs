//! GitHub branch source

use devops_core::domain::GitHubSource;

use super::ScmSourceCodec;
use super::traits::{self, TRAITS};
use crate::element::Element;

// XStream escapes `_` in tags, the trust class keeps the dotted name.
const BRANCH_DISCOVERY_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.BranchDiscoveryTrait";
const ORIGIN_PR_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.OriginPullRequestDiscoveryTrait";
const FORK_PR_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.ForkPullRequestDiscoveryTrait";
const FORK_PR_CLASS: &str =
    "org.jenkinsci.plugins.github_branch_source.ForkPullRequestDiscoveryTrait";

impl ScmSourceCodec for GitHubSource {
    const CLASS: &'static str = "org.jenkinsci.plugins.github_branch_source.GitHubSCMSource";
    const PLUGIN: &'static str = "github-branch-source";

    fn encode_fields(&self, scm_id: &str, source: &mut Element) {
        source.create_child("id").set_text(scm_id);
        source
            .create_child("credentialsId")
            .set_text(&self.credential_id);
        source.create_child("repoOwner").set_text(&self.owner);
        source.create_child("repository").set_text(&self.repo);
        if !self.api_uri.is_empty() {
            source.create_child("apiUri").set_text(&self.api_uri);
        }

        let container = source.create_child(TRAITS);
        if self.discover_branches != 0 {
            traits::encode_strategy(container, BRANCH_DISCOVERY_TRAIT, self.discover_branches);
        }
        if self.discover_pr_from_origin != 0 {
            traits::encode_strategy(container, ORIGIN_PR_TRAIT, self.discover_pr_from_origin);
        }
        if let Some(forks) = &self.discover_pr_from_forks {
            traits::encode_fork_discovery(container, FORK_PR_TRAIT, FORK_PR_CLASS, forks);
        }
        traits::encode_common(container, self.clone_option.as_ref(), &self.regex_filter);
    }

    fn decode(source: &Element) -> Self {
        let mut github = GitHubSource {
            scm_id: source.child_string("id"),
            owner: source.child_string("repoOwner"),
            repo: source.child_string("repository"),
            credential_id: source.child_string("credentialsId"),
            api_uri: source.child_string("apiUri"),
            ..Default::default()
        };

        if let Some(container) = source.child(TRAITS) {
            github.discover_branches = traits::decode_strategy(container, BRANCH_DISCOVERY_TRAIT);
            github.discover_pr_from_origin = traits::decode_strategy(container, ORIGIN_PR_TRAIT);
            github.discover_pr_from_forks = traits::decode_fork_discovery(container, FORK_PR_TRAIT);
            github.clone_option = traits::decode_clone_option(container);
            github.regex_filter = traits::decode_regex_filter(container);
        }

        github
    }
}
