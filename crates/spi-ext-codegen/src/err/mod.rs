//! Error types for adaptive proxy synthesis.

use thiserror::Error;

/// Errors raised while resolving or assembling an adaptive dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// A capability's `ADAPTIVE_METHODS` list is empty: an adaptive
    /// dispatcher was asked for but no method on the capability ever
    /// declared itself adaptive.
    #[error("capability `{capability}` has no method marked adaptive")]
    NoAdaptiveMethod {
        /// The capability's type name.
        capability: &'static str,
    },

    /// An adaptive method declared `has_url_source: false` — no `UrlLike`
    /// argument and no getter reachable from its parameters.
    #[error("capability `{capability}` method `{method}` has no reachable URL source")]
    NoUrlSource {
        /// The capability's type name.
        capability: &'static str,
        /// The offending method's name.
        method: &'static str,
    },

    /// The URL argument (or the object it was read from) was absent at
    /// call time.
    #[error("capability `{capability}` method `{method}` was called with no URL")]
    IllegalArgument {
        /// The capability's type name.
        capability: &'static str,
        /// The offending method's name.
        method: &'static str,
    },

    /// Every key in the lookup cascade, plus the SPI default, resolved to
    /// an empty extension name.
    #[error("capability `{capability}` method `{method}` resolved an empty extension name from {url_debug}")]
    IllegalState {
        /// The capability's type name.
        capability: &'static str,
        /// The offending method's name.
        method: &'static str,
        /// A diagnostic rendering of the URL that was consulted.
        url_debug: String,
    },
}

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthesisError>;
