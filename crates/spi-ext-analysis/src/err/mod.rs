//! Error types for capability structural validation.

use thiserror::Error;

/// Errors raised while validating a capability's registrations before a
/// `Loader` is built for it — these run eagerly at bootstrap rather than
/// being deferred to first class-load.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// `Capability::SPI_DEFAULT` must be either absent or a single
    /// whitespace-free token; multiple names or embedded separators are
    /// rejected at construction time.
    #[error("capability `{capability}` declares an invalid default name `{default}`")]
    InvalidDefaultName {
        /// The capability's type name.
        capability: &'static str,
        /// The offending default-name string.
        default: &'static str,
    },

    /// More than one registration claimed `Role::Adaptive` for the same
    /// capability; at most one adaptive dispatcher is allowed.
    #[error("capability `{capability}` has {count} adaptive registrations, expected at most one")]
    DuplicateAdaptive {
        /// The capability's type name.
        capability: &'static str,
        /// How many adaptive registrations were found.
        count: usize,
    },

    /// An `Activate` metadata block named itself in its own `before` or
    /// `after` list.
    #[error("capability `{capability}` extension `{name}` lists itself in its own before/after set")]
    SelfReferentialActivation {
        /// The capability's type name.
        capability: &'static str,
        /// The offending extension name.
        name: String,
    },
}

/// Result type alias for capability validation.
pub type Result<T> = std::result::Result<T, CapabilityError>;
