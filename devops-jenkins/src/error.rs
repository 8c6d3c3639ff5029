//! Error types for the job configuration codec

use devops_core::DefinitionError;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding or decoding job configurations
#[derive(Debug, Error)]
pub enum CodecError {
    /// The text is not well-formed XML
    #[error("failed to parse job configuration: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The expected root element is absent
    #[error("{0}")]
    MissingRoot(&'static str),

    /// A multi-branch configuration without a branch source
    #[error("can not parse multi-branch pipeline config: no branch source")]
    MissingSource,

    /// The branch source carries a class this codec does not know
    #[error("can not parse multi-branch pipeline config: unknown scm source class `{0}`")]
    UnknownSourceClass(String),

    /// The scan interval is not a number of milliseconds
    #[error("invalid scan interval `{value}`: {source}")]
    InvalidInterval {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A value holds a character XML documents cannot carry
    #[error("element `{tag}` contains a character not allowed in XML: {ch:?}")]
    InvalidCharacter { tag: String, ch: char },

    /// The XML writer failed
    #[error("failed to write job configuration: {0}")]
    Write(String),

    /// The definition failed validation before encoding
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl CodecError {
    /// Check if the document itself is malformed
    ///
    /// Structural errors never go away on retry.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Xml(_) | Self::MissingRoot(_) | Self::MissingSource | Self::UnknownSourceClass(_)
        )
    }
}
