//! Subversion branch sources

use devops_core::domain::{SingleSvnSource, SvnSource};

use super::ScmSourceCodec;
use crate::element::Element;

const SUBVERSION_SCM: &str = "hudson.scm.SubversionSCM";
const MODULE_LOCATION: &str = "hudson.scm.SubversionSCM_-ModuleLocation";
const UPDATE_UPDATER: &str = "hudson.scm.subversion.UpdateUpdater";

fn set_if_present(source: &mut Element, tag: &str, value: &str) {
    if !value.is_empty() {
        source.create_child(tag).set_text(value);
    }
}

impl ScmSourceCodec for SvnSource {
    const CLASS: &'static str = "jenkins.scm.impl.subversion.SubversionSCMSource";
    const PLUGIN: &'static str = "subversion";

    fn encode_fields(&self, scm_id: &str, source: &mut Element) {
        source.create_child("id").set_text(scm_id);
        set_if_present(source, "credentialsId", &self.credential_id);
        set_if_present(source, "remoteBase", &self.remote);
        set_if_present(source, "includes", &self.includes);
        set_if_present(source, "excludes", &self.excludes);
    }

    fn decode(source: &Element) -> Self {
        SvnSource {
            scm_id: source.child_string("id"),
            remote: source.child_string("remoteBase"),
            credential_id: source.child_string("credentialsId"),
            includes: source.child_string("includes"),
            excludes: source.child_string("excludes"),
        }
    }
}

/// A single location checked out as the `master` branch
impl ScmSourceCodec for SingleSvnSource {
    const CLASS: &'static str = "jenkins.scm.impl.SingleSCMSource";
    const PLUGIN: &'static str = "scm-api";

    fn encode_fields(&self, scm_id: &str, source: &mut Element) {
        source.create_child("id").set_text(scm_id);
        source.create_child("name").set_text("master");

        let scm = source
            .create_child("scm")
            .set_attr("class", SUBVERSION_SCM)
            .set_attr("plugin", "subversion");

        let location = scm.create_child("locations").create_child(MODULE_LOCATION);
        set_if_present(location, "remote", &self.remote);
        set_if_present(location, "credentialsId", &self.credential_id);
        location.create_child("local").set_text(".");
        location.create_child("depthOption").set_text("infinity");
        location.create_child("ignoreExternalsOption").set_text("true");
        location
            .create_child("cancelProcessOnExternalsFail")
            .set_text("true");

        for tag in [
            "excludedRegions",
            "includedRegions",
            "excludedUsers",
            "excludedRevprop",
            "excludedCommitMessages",
        ] {
            scm.create_child(tag);
        }
        scm.create_child("workspaceUpdater")
            .set_attr("class", UPDATE_UPDATER);
        scm.create_child("ignoreDirPropChanges").set_text("false");
        scm.create_child("filterChangelog").set_text("false");
        scm.create_child("quietOperation").set_text("true");
    }

    fn decode(source: &Element) -> Self {
        let location = source.select_path(&["scm", "locations", MODULE_LOCATION]);

        SingleSvnSource {
            scm_id: source.child_string("id"),
            remote: location
                .map(|location| location.child_string("remote"))
                .unwrap_or_default(),
            credential_id: location
                .map(|location| location.child_string("credentialsId"))
                .unwrap_or_default(),
        }
    }
}
