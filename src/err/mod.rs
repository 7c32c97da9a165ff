//! Aggregated error type for the `spi-ext` facade.
//!
//! Each crate owns its own `thiserror` enum; the root crate's `Error` just
//! folds them together with `#[from]` so a caller depending only on
//! `spi-ext` never has to name a sub-crate's error type directly.

use thiserror::Error;

/// The facade's aggregate error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Manifest discovery or parsing failed.
    #[error("manifest error: {0}")]
    Manifest(#[from] spi_ext_manifest::ManifestError),

    /// Capability structural validation failed.
    #[error("capability error: {0}")]
    Capability(#[from] spi_ext_analysis::CapabilityError),

    /// Adaptive dispatch resolution failed.
    #[error("adaptive synthesis error: {0}")]
    Synthesis(#[from] spi_ext_codegen::SynthesisError),

    /// Classification, instantiation, wrapping, or activation failed.
    #[error("loader error: {0}")]
    Loader(#[from] spi_ext_loader::LoaderError),

    /// Loading `LoaderSettings` from files/environment failed.
    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

/// Result type alias for the facade's public operations.
pub type Result<T> = std::result::Result<T, Error>;
