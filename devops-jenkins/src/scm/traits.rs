//! Source traits shared by the Git based sources

use devops_core::domain::{BitbucketForkTrust, CloneOption, DiscoverPrFromForks, GitHubForkTrust};

use crate::element::Element;

pub(crate) const TRAITS: &str = "traits";
const CLONE_OPTION_TRAIT: &str = "jenkins.plugins.git.traits.CloneOptionTrait";
const CLONE_OPTION_CLASS: &str = "hudson.plugins.git.extensions.impl.CloneOption";
const REGEX_FILTER_TRAIT: &str = "jenkins.scm.impl.trait.RegexSCMHeadFilterTrait";
const STRATEGY_ID: &str = "strategyId";

/// Trust level of fork pull requests, written as a nested class name
pub(crate) trait ForkTrustClass: Copy + Sized {
    /// Suffix after `$` in the trust class
    fn class_suffix(self) -> &'static str;

    fn from_class_suffix(suffix: &str) -> Option<Self>;
}

impl ForkTrustClass for GitHubForkTrust {
    fn class_suffix(self) -> &'static str {
        match self {
            GitHubForkTrust::Contributors => "TrustContributors",
            GitHubForkTrust::Everyone => "TrustEveryone",
            GitHubForkTrust::Permission => "TrustPermission",
            GitHubForkTrust::Nobody => "TrustNobody",
        }
    }

    fn from_class_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "TrustContributors" => Some(GitHubForkTrust::Contributors),
            "TrustEveryone" => Some(GitHubForkTrust::Everyone),
            "TrustPermission" => Some(GitHubForkTrust::Permission),
            "TrustNobody" => Some(GitHubForkTrust::Nobody),
            _ => None,
        }
    }
}

impl ForkTrustClass for BitbucketForkTrust {
    fn class_suffix(self) -> &'static str {
        match self {
            BitbucketForkTrust::Everyone => "TrustEveryone",
            BitbucketForkTrust::TeamForks => "TrustTeamForks",
            BitbucketForkTrust::Nobody => "TrustNobody",
        }
    }

    fn from_class_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "TrustEveryone" => Some(BitbucketForkTrust::Everyone),
            "TrustTeamForks" => Some(BitbucketForkTrust::TeamForks),
            "TrustNobody" => Some(BitbucketForkTrust::Nobody),
            _ => None,
        }
    }
}

/// Trait element carrying a single `strategyId`
pub(crate) fn encode_strategy(traits: &mut Element, trait_tag: &str, strategy: i32) {
    traits
        .create_child(trait_tag)
        .create_child(STRATEGY_ID)
        .set_text(strategy.to_string());
}

/// Strategy id of a trait, 0 when the trait is absent or unreadable
pub(crate) fn decode_strategy(traits: &Element, trait_tag: &str) -> i32 {
    traits
        .child(trait_tag)
        .and_then(|discovery| discovery.child_text(STRATEGY_ID))
        .and_then(|strategy| strategy.trim().parse().ok())
        .unwrap_or(0)
}

/// Fork pull request discovery with its trust class
///
/// `trait_class` is the dotted class of the trait; tags may escape it
/// differently, hence the separate `trait_tag`.
pub(crate) fn encode_fork_discovery<T: ForkTrustClass>(
    traits: &mut Element,
    trait_tag: &str,
    trait_class: &str,
    forks: &DiscoverPrFromForks<T>,
) {
    let discovery = traits.create_child(trait_tag);
    discovery
        .create_child(STRATEGY_ID)
        .set_text(forks.strategy.to_string());
    discovery.create_child("trust").set_attr(
        "class",
        format!("{}${}", trait_class, forks.trust.class_suffix()),
    );
}

pub(crate) fn decode_fork_discovery<T: ForkTrustClass>(
    traits: &Element,
    trait_tag: &str,
) -> Option<DiscoverPrFromForks<T>> {
    let discovery = traits.child(trait_tag)?;
    let strategy = discovery
        .child_text(STRATEGY_ID)
        .and_then(|strategy| strategy.trim().parse().ok())
        .unwrap_or(0);
    let (_, suffix) = discovery.child("trust")?.attr("class")?.split_once('$')?;
    let trust = T::from_class_suffix(suffix)?;

    Some(DiscoverPrFromForks { strategy, trust })
}

pub(crate) fn encode_clone_option(traits: &mut Element, option: &CloneOption) {
    let extension = traits
        .create_child(CLONE_OPTION_TRAIT)
        .create_child("extension")
        .set_attr("class", CLONE_OPTION_CLASS);
    extension
        .create_child("shallow")
        .set_text(option.shallow.to_string());
    extension.create_child("noTags").set_text("false");
    extension.create_child("honorRefspec").set_text("true");
    extension.create_child("reference");
    extension
        .create_child("timeout")
        .set_text(option.effective_timeout().to_string());
    extension
        .create_child("depth")
        .set_text(option.effective_depth().to_string());
}

pub(crate) fn decode_clone_option(traits: &Element) -> Option<CloneOption> {
    let extension = traits.select_path(&[CLONE_OPTION_TRAIT, "extension"])?;
    let parse = |tag: &str| {
        extension
            .child_text(tag)
            .and_then(|value| value.trim().parse::<i32>().ok())
            .unwrap_or_default()
    };

    Some(CloneOption {
        shallow: extension
            .child_text("shallow")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_default(),
        timeout: parse("timeout"),
        depth: parse("depth"),
    })
}

pub(crate) fn encode_regex_filter(traits: &mut Element, regex: &str) {
    traits
        .create_child(REGEX_FILTER_TRAIT)
        .set_attr("plugin", "scm-api")
        .create_child("regex")
        .set_text(regex);
}

pub(crate) fn decode_regex_filter(traits: &Element) -> String {
    traits
        .select_path(&[REGEX_FILTER_TRAIT, "regex"])
        .map(|regex| regex.text().to_string())
        .unwrap_or_default()
}

/// Clone option and regex filter, written last in every traits container
pub(crate) fn encode_common(traits: &mut Element, clone_option: Option<&CloneOption>, regex: &str) {
    if let Some(option) = clone_option {
        encode_clone_option(traits, option);
    }
    if !regex.is_empty() {
        encode_regex_filter(traits, regex);
    }
}
