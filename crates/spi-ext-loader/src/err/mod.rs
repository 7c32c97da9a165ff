//! Error types for classification, instantiation, and activation.

use thiserror::Error;

/// Errors raised while resolving, constructing, wrapping, or activating
/// extensions for a capability.
#[derive(Debug, Error, Clone)]
pub enum LoaderError {
    /// A manifest entry's name has no corresponding registration. When the
    /// name failed to resolve because its class load failed outright
    /// (rather than simply never being mentioned), that underlying
    /// [`LoaderError::ClassLoadError`] is carried as `cause` — spec.md
    /// requires `get(bad)` to raise `UnknownExtension` "whose cause is the
    /// load error", not the load error itself.
    #[error("no registration found for extension `{name}` of capability `{capability}`")]
    UnknownExtension {
        /// The capability's type name.
        capability: &'static str,
        /// The name that could not be resolved.
        name: String,
        /// The remembered load failure that made this name unresolvable,
        /// if any.
        #[source]
        cause: Option<Box<LoaderError>>,
    },

    /// A manifest entry named a registration key that isn't registered
    /// for this capability.
    #[error("extension `{name}` of capability `{capability}` resolves to unregistered key `{key}`")]
    ClassLoadError {
        /// The capability's type name.
        capability: &'static str,
        /// The name the failing entry declared.
        name: String,
        /// The registration key it resolved to.
        key: String,
    },

    /// `Loader::<T>::adaptive()` was called, the capability declares at
    /// least one adaptive method, but no registration claimed
    /// `Role::Adaptive` for it.
    #[error("capability `{capability}` has no adaptive extension registered")]
    NoAdaptiveExtension {
        /// The capability's type name.
        capability: &'static str,
    },

    /// `get("")` or an empty/blank name was passed to `Loader::get`.
    #[error("extension name must not be empty")]
    InvalidName,

    /// Manifest discovery or parsing failed.
    #[error(transparent)]
    Manifest(#[from] spi_ext_manifest::ManifestError),

    /// Capability structural validation failed.
    #[error(transparent)]
    Capability(#[from] spi_ext_analysis::CapabilityError),

    /// Adaptive dispatcher synthesis/validation failed; the adaptive slot
    /// becomes poisoned and every subsequent `adaptive()` call rethrows
    /// this same error.
    #[error(transparent)]
    Synthesis(#[from] spi_ext_codegen::SynthesisError),
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
