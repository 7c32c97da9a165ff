//! Error types for manifest discovery and parsing.

use thiserror::Error;

use crate::position::Span;

/// Errors raised while reading and parsing extension manifests.
#[derive(Debug, Error, Clone)]
pub enum ManifestError {
    /// A manifest resource could not be read.
    ///
    /// `reason` carries the rendered `io::Error` rather than the error
    /// itself: `io::Error` isn't `Clone`, and every error in this
    /// workspace is — loader error slots are published as shared,
    /// re-readable state, not consumed once like a typical `Result`.
    #[error("failed to read manifest {resource}: {reason}")]
    Unreadable {
        /// The resource path that failed to read.
        resource: String,
        /// The underlying IO error, rendered to text.
        reason: String,
    },

    /// A line did not match the manifest grammar.
    #[error("malformed manifest line at {span}: {reason}")]
    MalformedLine {
        /// Where the offending line is.
        span: Span,
        /// Why it was rejected.
        reason: String,
    },

    /// Two manifest entries declared the same name against different keys.
    #[error(
        "duplicate extension name `{name}`: {first} declares `{first_key}`, {second} declares `{second_key}`"
    )]
    DuplicateName {
        /// The colliding name.
        name: String,
        /// Where the first declaration came from.
        first: Span,
        /// The key the first declaration resolved to.
        first_key: String,
        /// Where the conflicting declaration came from.
        second: Span,
        /// The key the conflicting declaration resolved to.
        second_key: String,
    },
}

/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
