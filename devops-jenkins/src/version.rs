//! XML declaration version shim
//!
//! Documents are generated and parsed as XML 1.0 but the CI engine stores
//! and expects XML 1.1. Only the declaration on the first line is touched.

/// Version token used while building and parsing trees
pub const PARSED_VERSION: &str = "1.0";

/// Version token written into every emitted document
pub const EMITTED_VERSION: &str = "1.1";

/// Replace `from` with `to` on the first line of `text` only
pub fn rewrite_declared_version(text: &str, from: &str, to: &str) -> String {
    match text.split_once('\n') {
        Some((first, rest)) => format!("{}\n{}", first.replace(from, to), rest),
        None => text.replace(from, to),
    }
}

pub(crate) fn for_parsing(text: &str) -> String {
    rewrite_declared_version(text, EMITTED_VERSION, PARSED_VERSION)
}

pub(crate) fn for_emitting(text: &str) -> String {
    rewrite_declared_version(text, PARSED_VERSION, EMITTED_VERSION)
}
