//! A service-provider-interface (SPI) extension loader: a runtime registry
//! that, given an abstract capability, discovers named implementations
//! declared by plain-text manifests, instantiates them on demand, wires
//! dependencies between them, wraps them in decorator chains, and resolves
//! a per-call dispatch target for capability methods marked adaptive.
//!
//! This crate is the thin facade over the workspace: `spi_ext_core`
//! supplies the data model, `spi_ext_manifest` discovers and parses
//! manifests, `spi_ext_analysis` validates capability shape and renders
//! diagnostics, `spi_ext_codegen` resolves adaptive dispatch targets, and
//! `spi_ext_loader` ties classification, instance caching, injection,
//! wrapping, and activation together behind [`Loader`]. See `DESIGN.md`
//! at the workspace root for the full design and its grounding.

pub mod err;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use err::{Error, Result};
pub use settings::LoaderSettings;
pub use spi_ext_loader::{current, loader, loader_from_source, Loader};

/// Returns the process-wide [`Loader`] for capability `T`, honoring
/// `settings.manifest_root` as the search root and `settings.injection_enabled`
/// as whether the injector participates in `get`/`adaptive`/`activate`.
///
/// This is the settings-aware counterpart to [`loader`], which always
/// searches `root` with injection on; callers that load a [`LoaderSettings`]
/// from `config/*` or `SPI_EXT_*` environment variables use this instead.
pub fn loader_from_settings<T: spi_ext_core::model::Capability + ?Sized>(
    settings: &LoaderSettings,
) -> Result<std::sync::Arc<Loader<T>>> {
    Ok(spi_ext_loader::loader_with_options(
        settings.manifest_root.clone(),
        settings.injection_enabled,
    )?)
}

/// Re-exports the pieces most callers need to declare a capability, write
/// an extension, and resolve instances against it.
pub mod prelude {
    pub use crate::err::{Error, Result};
    pub use crate::settings::LoaderSettings;

    pub use spi_ext_analysis::LoaderReport;
    pub use spi_ext_codegen::{require_url, resolve_extension_name};
    pub use spi_ext_core::factory::{CompositeExtensionFactory, ExtensionFactory, ExtensionFactoryExt};
    pub use spi_ext_core::markers::{AdaptiveKeys, AdaptiveMethodDescriptor};
    pub use spi_ext_core::model::{
        ActivateMeta, Capability, ExtensionRegistration, NamedBuild, Role, WrapperBuild,
    };
    pub use spi_ext_core::url::{SimpleUrl, UrlLike};
    pub use spi_ext_manifest::{FsManifestSource, ManifestSource, MemoryManifestSource};
    pub use spi_ext_loader::{current, loader, loader_from_source, Loader};
    pub use crate::loader_from_settings;
}
