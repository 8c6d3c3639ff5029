//! Plain Git branch source

use devops_core::domain::GitSource;

use super::ScmSourceCodec;
use super::traits::{self, TRAITS};
use crate::element::Element;

const BRANCH_DISCOVERY_TRAIT: &str = "jenkins.plugins.git.traits.BranchDiscoveryTrait";

impl ScmSourceCodec for GitSource {
    const CLASS: &'static str = "jenkins.plugins.git.GitSCMSource";
    const PLUGIN: &'static str = "git";

    fn encode_fields(&self, scm_id: &str, source: &mut Element) {
        source.create_child("id").set_text(scm_id);
        source.create_child("remote").set_text(&self.url);
        if !self.credential_id.is_empty() {
            source
                .create_child("credentialsId")
                .set_text(&self.credential_id);
        }

        let container = source.create_child(TRAITS);
        if self.discover_branches {
            container.create_child(BRANCH_DISCOVERY_TRAIT);
        }
        traits::encode_common(container, self.clone_option.as_ref(), &self.regex_filter);
    }

    fn decode(source: &Element) -> Self {
        let mut git = GitSource {
            scm_id: source.child_string("id"),
            url: source.child_string("remote"),
            credential_id: source.child_string("credentialsId"),
            ..Default::default()
        };

        if let Some(container) = source.child(TRAITS) {
            git.discover_branches = container.child(BRANCH_DISCOVERY_TRAIT).is_some();
            git.clone_option = traits::decode_clone_option(container);
            git.regex_filter = traits::decode_regex_filter(container);
        }

        git
    }
}
