//! Error types for pipeline definitions

use thiserror::Error;

/// Result type alias for definition conversions
pub type Result<T> = std::result::Result<T, DefinitionError>;

/// Errors raised when a loosely typed definition cannot become a domain value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// `type` is neither a no-SCM nor a multi-branch pipeline
    #[error("unsupported pipeline type: {0}")]
    UnsupportedPipelineType(String),

    /// `source_type` is not one of the five known SCM kinds
    #[error("unsupported source type: {0}")]
    UnsupportedSourceType(String),

    /// The discriminator names a payload that was not provided
    #[error("missing payload: expected `{expected}` to be set")]
    MissingPayload {
        /// JSON field that should have carried the payload
        expected: &'static str,
    },

    /// A fork trust level outside the range the SCM supports
    #[error("unsupported fork trust level {level} for {scm}")]
    UnsupportedTrust {
        /// SCM family the trust applies to
        scm: &'static str,
        /// Raw numeric level
        level: i32,
    },
}
