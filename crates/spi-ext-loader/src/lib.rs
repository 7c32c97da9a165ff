//! Classification, instance caching, injection, wrapper composition, and
//! activation selection for the SPI extension loader.
//!
//! Manifest discovery (`spi-ext-manifest`) and capability validation
//! (`spi-ext-analysis`) are upstream of this crate; the adaptive proxy
//! synthesizer (`spi-ext-codegen`) is a sibling consumed by hand-written
//! adaptive dispatch bodies, not by this crate directly.

pub mod activate;
pub mod classify;
pub mod err;
pub mod inject;
pub mod loader;
pub mod registry;
pub mod wrap;

pub use err::{LoaderError, Result};
pub use loader::{Ctor, Loader};
pub use registry::{current, loader, loader_from_source, loader_from_source_with_options, loader_with_options};

#[cfg(any(test, feature = "test-support"))]
pub use registry::{reset_registry, reset_singletons};
