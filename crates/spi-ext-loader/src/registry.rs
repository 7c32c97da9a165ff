//! Process-wide state: the `capability -> Loader<T>` map, and the
//! `class -> singleton instance` map wrapper composition shares across
//! every name that resolves to the same registration, type-erased behind
//! `Any`.

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use spi_ext_core::factory::{CompositeExtensionFactory, ExtensionFactory};
use spi_ext_core::model::{Capability, ExtensionRegistration};
use spi_ext_manifest::{FsManifestSource, ManifestSource};

use crate::err::Result;
use crate::loader::Loader;

type LoaderMap = DashMap<TypeId, Arc<dyn Any + Send + Sync>>;

static REGISTRY: OnceLock<LoaderMap> = OnceLock::new();

fn registry() -> &'static LoaderMap {
    REGISTRY.get_or_init(DashMap::new)
}

type SingletonMap = DashMap<(TypeId, &'static str), Arc<dyn Any + Send + Sync>>;

static SINGLETONS: OnceLock<SingletonMap> = OnceLock::new();

fn singletons() -> &'static SingletonMap {
    SINGLETONS.get_or_init(DashMap::new)
}

/// Returns the process-wide raw instance shared by every name whose
/// manifest entry resolves to `registration`, publishing `built` as the
/// winner if nothing has been published for this `(T, registration.key)`
/// pair yet.
///
/// This is what lets two aliases of the same class (`en,uk=some::Class`)
/// — or the same wrapper class discovered under two different
/// capabilities, in the one-in-a-million case that happens — share the
/// identical pre-wrap instance, exactly as the per-name instance cache
/// alone cannot: that cache is keyed by *name*, and two names resolving
/// to the same registration would otherwise each build their own copy.
/// First-writer-wins, same discipline as [`loader_from_source`]: the
/// loser's freshly built instance is simply dropped.
pub(crate) fn singleton_for<T: Capability + ?Sized>(
    registration: &'static ExtensionRegistration,
    built: Arc<T>,
) -> Arc<T> {
    let key = (TypeId::of::<T>(), registration.key);
    let erased: Arc<dyn Any + Send + Sync> = Arc::new(built);
    let entry = singletons().entry(key).or_insert_with(|| erased);
    let winner: Arc<Arc<T>> = entry
        .clone()
        .downcast::<Arc<T>>()
        .expect("singleton entry type mismatch for this (capability, key) pair");
    (*winner).clone()
}

/// Test/bootstrap-only teardown, clearing every cached class singleton.
#[cfg(any(test, feature = "test-support"))]
pub fn reset_singletons() {
    singletons().clear();
}

/// Returns the process-wide [`Loader`] for capability `T`, building it on
/// first use from manifests found under `root` (an ancestor of a
/// `META-INF` directory) and an empty [`CompositeExtensionFactory`].
///
/// Concurrent first calls for the same `T` race to build; the loser's
/// freshly built `Loader` is dropped in favor of whichever one the
/// registry's shard lock accepted first (`DashMap::entry().or_insert_with()`
/// is naturally first-writer-wins).
pub fn loader<T: Capability + ?Sized>(root: impl Into<std::path::PathBuf>) -> Result<Arc<Loader<T>>> {
    loader_with_options(root, true)
}

/// As [`loader`], but with injection toggled explicitly rather than always
/// on. `root` is the `manifest_root` a [`crate::LoaderSettings`]-driven
/// caller resolved; `injection_enabled` is that same settings value.
pub fn loader_with_options<T: Capability + ?Sized>(
    root: impl Into<std::path::PathBuf>,
    injection_enabled: bool,
) -> Result<Arc<Loader<T>>> {
    let source = FsManifestSource::new(root);
    let factory: Arc<dyn ExtensionFactory> = Arc::new(CompositeExtensionFactory::new());
    loader_from_source_with_options(&source, factory, injection_enabled)
}

/// Returns the process-wide [`Loader`] for capability `T`, building it
/// from a caller-supplied [`ManifestSource`] and [`ExtensionFactory`] on
/// first use. Used directly by tests that don't want to touch the
/// filesystem, and by [`loader`] for the common on-disk case.
pub fn loader_from_source<T: Capability + ?Sized>(
    source: &dyn ManifestSource,
    factory: Arc<dyn ExtensionFactory>,
) -> Result<Arc<Loader<T>>> {
    loader_from_source_with_options(source, factory, true)
}

/// As [`loader_from_source`], but with injection toggled explicitly.
pub fn loader_from_source_with_options<T: Capability + ?Sized>(
    source: &dyn ManifestSource,
    factory: Arc<dyn ExtensionFactory>,
    injection_enabled: bool,
) -> Result<Arc<Loader<T>>> {
    let target = TypeId::of::<T>();
    if let Some(existing) = registry().get(&target) {
        return Ok(downcast::<T>(&existing));
    }

    let built: Arc<dyn Any + Send + Sync> =
        Arc::new(Loader::<T>::bootstrap_with_injection(source, factory, injection_enabled)?);
    let entry = registry().entry(target).or_insert_with(|| built);
    Ok(downcast::<T>(&entry))
}

/// Returns the already-built [`Loader`] for capability `T`, if one has been
/// created via [`loader`] or [`loader_from_source`] anywhere in this
/// process. Adaptive dispatch bodies use this to reach back into their own
/// loader without needing a manifest source or factory at call time — by
/// the time an adaptive instance is invoked, the loader that built it is
/// already registered.
pub fn current<T: Capability + ?Sized>() -> Option<Arc<Loader<T>>> {
    let target = TypeId::of::<T>();
    registry().get(&target).map(|entry| downcast::<T>(&entry))
}

fn downcast<T: Capability + ?Sized>(entry: &Arc<dyn Any + Send + Sync>) -> Arc<Loader<T>> {
    entry
        .clone()
        .downcast::<Loader<T>>()
        .expect("registry entry type mismatch for this TypeId")
}

/// Test/bootstrap-only teardown, clearing every cached loader. Never
/// called by production code; exists so test suites that register fixture
/// extensions per-test can start from a clean slate.
#[cfg(any(test, feature = "test-support"))]
pub fn reset_registry() {
    registry().clear();
}
