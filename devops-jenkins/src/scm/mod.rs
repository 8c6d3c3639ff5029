//! SCM branch sources
//!
//! Each source kind implements [`ScmSourceCodec`] once. The engine tells the
//! kinds apart by the `class` attribute of the `source` element, so decoding
//! dispatches on that attribute and encoding on the [`ScmSource`] variant.

mod bitbucket;
mod git;
mod github;
mod svn;
mod traits;

use devops_core::domain::{
    BitbucketServerSource, GitHubSource, GitSource, ScmSource, SingleSvnSource, SvnSource,
};

use crate::element::Element;
use crate::error::{CodecError, Result};

/// Encoding and decoding of one SCM source kind
pub trait ScmSourceCodec: Sized {
    /// Class discriminator the engine matches on
    const CLASS: &'static str;

    /// Plugin providing the source
    const PLUGIN: &'static str;

    /// Write identity fields and traits into the `source` element
    fn encode_fields(&self, scm_id: &str, source: &mut Element);

    /// Read a source back from its `source` element
    fn decode(source: &Element) -> Self;

    /// Stamp the class discriminator and write the source
    fn encode(&self, scm_id: &str, source: &mut Element) {
        source
            .set_attr("class", Self::CLASS)
            .set_attr("plugin", Self::PLUGIN);
        self.encode_fields(scm_id, source);
    }
}

/// Write `scm` into `source` under the identity `scm_id`
pub fn encode_source(scm: &ScmSource, scm_id: &str, source: &mut Element) {
    match scm {
        ScmSource::Git(git) => git.encode(scm_id, source),
        ScmSource::GitHub(github) => github.encode(scm_id, source),
        ScmSource::Svn(svn) => svn.encode(scm_id, source),
        ScmSource::SingleSvn(svn) => svn.encode(scm_id, source),
        ScmSource::BitbucketServer(bitbucket) => bitbucket.encode(scm_id, source),
    }
}

/// Read a source, selecting the kind from its class attribute
pub fn decode_source(source: &Element) -> Result<ScmSource> {
    let class = source.attr("class").unwrap_or_default();
    let scm = match class {
        c if c == GitSource::CLASS => ScmSource::Git(GitSource::decode(source)),
        c if c == GitHubSource::CLASS => ScmSource::GitHub(GitHubSource::decode(source)),
        c if c == SvnSource::CLASS => ScmSource::Svn(SvnSource::decode(source)),
        c if c == SingleSvnSource::CLASS => ScmSource::SingleSvn(SingleSvnSource::decode(source)),
        c if c == BitbucketServerSource::CLASS => {
            ScmSource::BitbucketServer(BitbucketServerSource::decode(source))
        }
        other => return Err(CodecError::UnknownSourceClass(other.to_string())),
    };
    Ok(scm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_core::domain::SourceType;

    fn encoded(scm: &ScmSource) -> Element {
        let mut source = Element::new("source");
        encode_source(scm, "demopipeline", &mut source);
        source
    }

    #[test]
    fn test_class_matches_source_type() {
        let cases = [
            (
                ScmSource::Git(GitSource::default()),
                "jenkins.plugins.git.GitSCMSource",
            ),
            (
                ScmSource::GitHub(GitHubSource::default()),
                "org.jenkinsci.plugins.github_branch_source.GitHubSCMSource",
            ),
            (
                ScmSource::Svn(SvnSource::default()),
                "jenkins.scm.impl.subversion.SubversionSCMSource",
            ),
            (
                ScmSource::SingleSvn(SingleSvnSource::default()),
                "jenkins.scm.impl.SingleSCMSource",
            ),
            (
                ScmSource::BitbucketServer(BitbucketServerSource::default()),
                "com.cloudbees.jenkins.plugins.bitbucket.BitbucketSCMSource",
            ),
        ];

        for (scm, class) in cases {
            let source = encoded(&scm);
            assert_eq!(source.attr("class"), Some(class));
            assert_eq!(source.child_text("id"), Some("demopipeline"));

            let decoded = decode_source(&source).unwrap();
            assert_eq!(decoded.source_type(), scm.source_type());
            assert_eq!(decoded.scm_id(), "demopipeline");
        }
    }

    #[test]
    fn test_unknown_class_is_an_error() {
        let source = Element::new("source")
            .with_attr("class", "io.jenkins.plugins.gitlabbranchsource.GitLabSCMSource");

        match decode_source(&source) {
            Err(CodecError::UnknownSourceClass(class)) => {
                assert_eq!(class, "io.jenkins.plugins.gitlabbranchsource.GitLabSCMSource")
            }
            other => panic!("expected unknown class error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_class_is_an_error() {
        let result = decode_source(&Element::new("source"));
        assert!(matches!(result, Err(CodecError::UnknownSourceClass(class)) if class.is_empty()));
    }

    #[test]
    fn test_every_source_type_has_a_codec() {
        for source_type in SourceType::ALL {
            let scm = match source_type {
                SourceType::Git => ScmSource::Git(GitSource::default()),
                SourceType::GitHub => ScmSource::GitHub(GitHubSource::default()),
                SourceType::Svn => ScmSource::Svn(SvnSource::default()),
                SourceType::SingleSvn => ScmSource::SingleSvn(SingleSvnSource::default()),
                SourceType::BitbucketServer => {
                    ScmSource::BitbucketServer(BitbucketServerSource::default())
                }
            };
            assert_eq!(
                decode_source(&encoded(&scm)).unwrap().source_type(),
                source_type
            );
        }
    }
}
