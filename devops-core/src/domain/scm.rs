//! SCM sources of multi-branch pipelines

use serde::{Deserialize, Serialize};

use crate::DefinitionError;

/// The single SCM source a multi-branch pipeline discovers branches from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScmSource {
    Git(GitSource),
    GitHub(GitHubSource),
    Svn(SvnSource),
    SingleSvn(SingleSvnSource),
    BitbucketServer(BitbucketServerSource),
}

impl ScmSource {
    pub fn source_type(&self) -> SourceType {
        match self {
            ScmSource::Git(_) => SourceType::Git,
            ScmSource::GitHub(_) => SourceType::GitHub,
            ScmSource::Svn(_) => SourceType::Svn,
            ScmSource::SingleSvn(_) => SourceType::SingleSvn,
            ScmSource::BitbucketServer(_) => SourceType::BitbucketServer,
        }
    }

    pub fn scm_id(&self) -> &str {
        match self {
            ScmSource::Git(source) => &source.scm_id,
            ScmSource::GitHub(source) => &source.scm_id,
            ScmSource::Svn(source) => &source.scm_id,
            ScmSource::SingleSvn(source) => &source.scm_id,
            ScmSource::BitbucketServer(source) => &source.scm_id,
        }
    }
}

/// Discriminator of an SCM source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Git,
    GitHub,
    Svn,
    SingleSvn,
    BitbucketServer,
}

impl SourceType {
    pub const ALL: [SourceType; 5] = [
        SourceType::Git,
        SourceType::GitHub,
        SourceType::Svn,
        SourceType::SingleSvn,
        SourceType::BitbucketServer,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceType::Git => "git",
            SourceType::GitHub => "github",
            SourceType::Svn => "svn",
            SourceType::SingleSvn => "single_svn",
            SourceType::BitbucketServer => "bitbucket_server",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|source_type| source_type.as_str() == s)
            .ok_or_else(|| DefinitionError::UnsupportedSourceType(s.to_string()))
    }
}

/// Plain Git repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scm_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential_id: String,
    #[serde(default)]
    pub discover_branches: bool,
    #[serde(
        default,
        rename = "git_clone_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub clone_option: Option<CloneOption>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regex_filter: String,
}

/// GitHub repository discovered through the branch-source plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scm_id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_uri: String,
    /// Branch discovery strategy id, 0 disables discovery
    #[serde(default)]
    pub discover_branches: i32,
    #[serde(default)]
    pub discover_pr_from_origin: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks<GitHubForkTrust>>,
    #[serde(
        default,
        rename = "git_clone_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub clone_option: Option<CloneOption>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regex_filter: String,
}

/// Bitbucket Server repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitbucketServerSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scm_id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential_id: String,
    /// Server URL
    #[serde(default)]
    pub api_uri: String,
    #[serde(default)]
    pub discover_branches: i32,
    #[serde(default)]
    pub discover_pr_from_origin: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks<BitbucketForkTrust>>,
    #[serde(
        default,
        rename = "git_clone_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub clone_option: Option<CloneOption>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regex_filter: String,
}

/// Subversion repository with branch discovery by include/exclude patterns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvnSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scm_id: String,
    #[serde(default)]
    pub remote: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub includes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excludes: String,
}

/// Single Subversion location, no discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSvnSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scm_id: String,
    #[serde(default)]
    pub remote: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential_id: String,
}

/// Git clone behaviour
///
/// Negative `timeout`/`depth` are written as the engine defaults (10 / 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneOption {
    #[serde(default)]
    pub shallow: bool,
    #[serde(default)]
    pub timeout: i32,
    #[serde(default)]
    pub depth: i32,
}

impl CloneOption {
    pub const DEFAULT_TIMEOUT: i32 = 10;
    pub const DEFAULT_DEPTH: i32 = 1;

    pub fn effective_timeout(&self) -> i32 {
        if self.timeout >= 0 {
            self.timeout
        } else {
            Self::DEFAULT_TIMEOUT
        }
    }

    pub fn effective_depth(&self) -> i32 {
        if self.depth >= 0 {
            self.depth
        } else {
            Self::DEFAULT_DEPTH
        }
    }
}

/// Discovery of pull requests opened from forks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverPrFromForks<T> {
    #[serde(default)]
    pub strategy: i32,
    pub trust: T,
}

/// Which fork authors a GitHub source trusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum GitHubForkTrust {
    Contributors = 1,
    Everyone = 2,
    Permission = 3,
    Nobody = 4,
}

impl TryFrom<i32> for GitHubForkTrust {
    type Error = DefinitionError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(GitHubForkTrust::Contributors),
            2 => Ok(GitHubForkTrust::Everyone),
            3 => Ok(GitHubForkTrust::Permission),
            4 => Ok(GitHubForkTrust::Nobody),
            level => Err(DefinitionError::UnsupportedTrust {
                scm: "github",
                level,
            }),
        }
    }
}

impl From<GitHubForkTrust> for i32 {
    fn from(trust: GitHubForkTrust) -> Self {
        trust as i32
    }
}

/// Which fork authors a Bitbucket Server source trusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum BitbucketForkTrust {
    Everyone = 1,
    TeamForks = 2,
    Nobody = 3,
}

impl TryFrom<i32> for BitbucketForkTrust {
    type Error = DefinitionError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(BitbucketForkTrust::Everyone),
            2 => Ok(BitbucketForkTrust::TeamForks),
            3 => Ok(BitbucketForkTrust::Nobody),
            level => Err(DefinitionError::UnsupportedTrust {
                scm: "bitbucket_server",
                level,
            }),
        }
    }
}

impl From<BitbucketForkTrust> for i32 {
    fn from(trust: BitbucketForkTrust) -> Self {
        trust as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_round_trips_through_str() {
        for source_type in SourceType::ALL {
            assert_eq!(source_type.as_str().parse::<SourceType>(), Ok(source_type));
        }
    }

    #[test]
    fn test_unknown_source_type_is_rejected() {
        assert_eq!(
            "gitlab".parse::<SourceType>(),
            Err(DefinitionError::UnsupportedSourceType("gitlab".to_string()))
        );
    }

    #[test]
    fn test_clone_option_defaults_for_negative_values() {
        let option = CloneOption {
            shallow: true,
            timeout: -1,
            depth: -3,
        };
        assert_eq!(option.effective_timeout(), 10);
        assert_eq!(option.effective_depth(), 1);

        let option = CloneOption {
            shallow: false,
            timeout: 0,
            depth: 5,
        };
        assert_eq!(option.effective_timeout(), 0);
        assert_eq!(option.effective_depth(), 5);
    }

    #[test]
    fn test_fork_trust_levels_differ_per_scm() {
        assert_eq!(GitHubForkTrust::try_from(2), Ok(GitHubForkTrust::Everyone));
        assert_eq!(
            BitbucketForkTrust::try_from(2),
            Ok(BitbucketForkTrust::TeamForks)
        );
        assert!(GitHubForkTrust::try_from(0).is_err());
        assert!(BitbucketForkTrust::try_from(4).is_err());
    }

    #[test]
    fn test_fork_trust_json_is_numeric() {
        let forks: DiscoverPrFromForks<GitHubForkTrust> =
            serde_json::from_str(r#"{"strategy": 2, "trust": 3}"#).unwrap();
        assert_eq!(forks.trust, GitHubForkTrust::Permission);
        assert_eq!(
            serde_json::to_string(&forks).unwrap(),
            r#"{"strategy":2,"trust":3}"#
        );

        let invalid =
            serde_json::from_str::<DiscoverPrFromForks<BitbucketForkTrust>>(r#"{"trust": 9}"#);
        assert!(invalid.is_err());
    }
}
