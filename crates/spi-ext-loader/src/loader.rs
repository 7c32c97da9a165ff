//! `Loader<T>`: the per-capability state machine tying together
//! classification, instance caching, injection, wrapper composition, and
//! activation selection.

use std::any::Any;
use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use spi_ext_analysis::validate_not_self_referential;
use spi_ext_analysis::LoaderReport;
use spi_ext_core::factory::ExtensionFactory;
use spi_ext_core::model::{ActivateMeta, Capability, ExtensionRegistration, NamedBuild, Role};
use spi_ext_core::url::UrlLike;
use spi_ext_core::utils::simple_type_name;
use spi_ext_manifest::ManifestSource;

use crate::activate::{self, ActivateCandidate};
use crate::classify::classify;
use crate::err::{LoaderError, Result};
use crate::wrap;

/// A user-supplied constructor for [`Loader::register`]/[`Loader::replace`],
/// available only behind `#[cfg(any(test, feature = "test-support"))]`.
pub type Ctor<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

struct NamedSlot {
    registration: &'static ExtensionRegistration,
    activate: Option<ActivateMeta>,
    discovery_index: usize,
}

/// The extension-point state for a single capability `T`: every name
/// resolvable against it, the instance cache backing those names, the
/// wrapper chain, and the adaptive dispatcher slot.
pub struct Loader<T: Capability + ?Sized> {
    capability_name: &'static str,
    classes: DashMap<String, NamedSlot>,
    instances: DashMap<String, Arc<OnceCell<Arc<T>>>>,
    adaptive_registration: Option<&'static ExtensionRegistration>,
    /// Holds the outcome of the *first* `adaptive()` call, success or
    /// failure. First-failure is sticky, to prevent repeat
    /// dispatcher-construction attempts from masking a configuration bug.
    /// Plain `OnceCell<Arc<T>>` would let a failed attempt retry on every
    /// subsequent call; storing the `Result` makes the poisoned state
    /// terminal.
    adaptive_instance: OnceCell<Result<Arc<T>>>,
    wrappers: RwLock<Vec<&'static ExtensionRegistration>>,
    default_name: Option<&'static str>,
    errors: DashMap<String, LoaderError>,
    factory: Arc<dyn ExtensionFactory>,
    /// Whether [`Loader::get`]/[`Loader::adaptive`] run the injector at all.
    /// Mirrors [`LoaderSettings::injection_enabled`](../../../src/settings.rs)
    /// one layer down — disabled by callers that want bare, uninjected
    /// instances (most commonly tests).
    injection_enabled: bool,
    #[cfg(any(test, feature = "test-support"))]
    overrides: DashMap<String, Ctor<T>>,
}

impl<T: Capability + ?Sized> Loader<T> {
    /// Discovers manifests, classifies registrations, and builds a fresh
    /// loader for capability `T` with injection enabled. Does not construct
    /// any instance — construction is lazy, triggered by [`Loader::get`] and
    /// friends.
    pub fn bootstrap(source: &dyn ManifestSource, factory: Arc<dyn ExtensionFactory>) -> Result<Self> {
        Self::bootstrap_with_injection(source, factory, true)
    }

    /// Same as [`Loader::bootstrap`], with the injector's participation
    /// controlled by `injection_enabled` rather than always on.
    pub fn bootstrap_with_injection(
        source: &dyn ManifestSource,
        factory: Arc<dyn ExtensionFactory>,
        injection_enabled: bool,
    ) -> Result<Self> {
        let capability_name = std::any::type_name::<T>();
        spi_ext_analysis::validate_default_name(capability_name, T::SPI_DEFAULT)?;

        let classification = classify::<T>()?;
        let capability_key = T::manifest_key();
        let capability_simple = simple_type_name(capability_key);
        let entries = spi_ext_manifest::read_manifest(source, capability_key, capability_simple)?;

        let classes = DashMap::new();
        let errors = DashMap::new();

        for entry in &entries {
            let Some(&registration) = classification.named.get(entry.key.as_str()) else {
                for name in &entry.names {
                    errors.insert(
                        name.clone(),
                        LoaderError::ClassLoadError {
                            capability: capability_name,
                            name: name.clone(),
                            key: entry.key.clone(),
                        },
                    );
                }
                continue;
            };
            let activate = match registration.role {
                Role::Named { activate } => activate,
                _ => None,
            };
            let discovery_index = classification
                .discovery_index
                .get(registration.key)
                .copied()
                .unwrap_or(usize::MAX);

            for name in &entry.names {
                if let Some(meta) = &activate {
                    validate_not_self_referential(capability_name, name, meta)?;
                }
                classes.insert(
                    name.clone(),
                    NamedSlot {
                        registration,
                        activate,
                        discovery_index,
                    },
                );
            }
        }

        // A declared default name must resolve to something the manifest
        // actually registered; a misconfigured default is a construction-time
        // failure, not a surprise on whatever `get(None)` call happens first.
        if let Some(default) = T::SPI_DEFAULT {
            if !classes.contains_key(default) {
                let cause = errors.get(default).map(|e| Box::new(e.clone()));
                return Err(LoaderError::UnknownExtension {
                    capability: capability_name,
                    name: default.to_string(),
                    cause,
                });
            }
        }

        Ok(Self {
            capability_name,
            classes,
            instances: DashMap::new(),
            adaptive_registration: classification.adaptive,
            adaptive_instance: OnceCell::new(),
            wrappers: RwLock::new(classification.wrappers),
            default_name: T::SPI_DEFAULT,
            errors,
            factory,
            injection_enabled,
            #[cfg(any(test, feature = "test-support"))]
            overrides: DashMap::new(),
        })
    }

    /// Resolves `name` to a shared instance, constructing, injecting, and
    /// wrapping it on first use, with a double-checked instance cache.
    ///
    /// An empty name is [`LoaderError::InvalidName`]. The literal sentinel
    /// `"true"` resolves the capability's default name instead. The source
    /// tradition's `get-default()` returns `null` when no default is
    /// configured; this rendition surfaces that case as
    /// [`LoaderError::UnknownExtension`] rather than an `Option`, to keep
    /// `get`'s return type uniform (see `DESIGN.md`).
    pub fn get(&self, name: &str) -> Result<Arc<T>> {
        if name.is_empty() {
            return Err(LoaderError::InvalidName);
        }
        if name == "true" {
            return match self.default_name {
                Some(default) => self.get(default),
                None => Err(LoaderError::UnknownExtension {
                    capability: self.capability_name,
                    name: name.to_string(),
                    cause: None,
                }),
            };
        }

        #[cfg(any(test, feature = "test-support"))]
        if let Some(ctor) = self.overrides.get(name) {
            let slot = self
                .instances
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone();
            return slot.get_or_try_init(|| Ok(ctor())).map(Arc::clone);
        }

        if let Some(error) = self.errors.get(name) {
            return Err(LoaderError::UnknownExtension {
                capability: self.capability_name,
                name: name.to_string(),
                cause: Some(Box::new(error.clone())),
            });
        }

        let Some(slot) = self.classes.get(name) else {
            return Err(LoaderError::UnknownExtension {
                capability: self.capability_name,
                name: name.to_string(),
                cause: None,
            });
        };
        let registration = slot.registration;

        let cell = self
            .instances
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        cell.get_or_try_init(|| self.construct(registration)).map(Arc::clone)
    }

    fn construct(&self, registration: &'static ExtensionRegistration) -> Result<Arc<T>> {
        let built: Box<dyn Any + Send + Sync> = (registration.build)();
        let NamedBuild { instance, inject } = *built.downcast::<NamedBuild<T>>().unwrap_or_else(|_| {
            panic!("registration `{}` build did not produce NamedBuild<T>", registration.key)
        });

        // Two manifest names can alias the same registration (`en,uk=...`);
        // the class-level singleton map is what makes them share one
        // underlying instance rather than each building their own.
        let instance = crate::registry::singleton_for(registration, instance);

        if self.injection_enabled {
            crate::inject::apply(self.capability_name, instance.as_ref(), inject, self.factory.as_ref());
        }

        let wrappers = self.wrappers.read();
        Ok(wrap::compose(instance, &wrappers, self.factory.as_ref(), self.injection_enabled))
    }

    /// Resolves the capability's declared default name, if any.
    pub fn default_instance(&self) -> Result<Option<Arc<T>>> {
        match self.default_name {
            Some(name) => self.get(name).map(Some),
            None => Ok(None),
        }
    }

    /// Resolves the capability's adaptive dispatcher.
    ///
    /// The result of the first call is sticky: a failure here (no adaptive
    /// method ever declared, or no dispatcher registered for methods that
    /// were declared) poisons the slot, and every later call rethrows the
    /// same error rather than retrying.
    pub fn adaptive(&self) -> Result<Arc<T>> {
        self.adaptive_instance
            .get_or_init(|| self.build_adaptive())
            .clone()
    }

    fn build_adaptive(&self) -> Result<Arc<T>> {
        match self.adaptive_registration {
            Some(registration) => self.construct(registration),
            None if T::ADAPTIVE_METHODS.is_empty() => {
                Err(spi_ext_codegen::validate_methods(self.capability_name, T::ADAPTIVE_METHODS).unwrap_err().into())
            }
            None => Err(LoaderError::NoAdaptiveExtension {
                capability: self.capability_name,
            }),
        }
    }

    /// Computes and resolves the ordered sequence of auto-activated
    /// extensions for `url`/`values`/`group`.
    pub fn activate(&self, url: &dyn UrlLike, values: &[&str], group: &str) -> Result<Vec<Arc<T>>> {
        // Names already spelled out (without a `-` prefix) in `values` are
        // inserted explicitly by `splice` below; dropping them here avoids
        // double-insertion when the auto batch would otherwise also select
        // them.
        let explicit: Vec<&str> = values
            .iter()
            .copied()
            .filter(|v| !v.starts_with('-') && *v != "default")
            .collect();

        let candidates: Vec<ActivateCandidate> = self
            .classes
            .iter()
            .filter_map(|entry| {
                let meta = entry.value().activate?;
                if explicit.contains(&entry.key().as_str()) {
                    return None;
                }
                if activate::matches_group(&meta, group) && activate::matches_value(&meta, url) {
                    Some(ActivateCandidate {
                        name: entry.key().clone(),
                        meta,
                        discovery_index: entry.value().discovery_index,
                    })
                } else {
                    None
                }
            })
            .collect();

        let ordered = activate::topo_sort(candidates);
        let auto_names: Vec<String> = ordered.into_iter().map(|c| c.name).collect();
        let final_names = activate::splice(values, auto_names);

        final_names.into_iter().map(|name| self.get(&name)).collect()
    }

    /// Every name currently resolvable against this capability (manifest
    /// entries that successfully resolved to a registration).
    pub fn supported_names(&self) -> BTreeSet<String> {
        self.classes.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Assembles a [`LoaderReport`] summarizing this loader's state.
    pub fn report(&self) -> LoaderReport {
        LoaderReport {
            capability_name: self.capability_name,
            loaded_names: self.supported_names().into_iter().collect(),
            wrapper_count: self.wrappers.read().len(),
            has_adaptive: self.adaptive_registration.is_some(),
            load_errors: self
                .errors
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().to_string()))
                .collect(),
        }
    }

    /// Registers a test-only override constructor for `name`, taking
    /// priority over any manifest-resolved registration. Gated behind
    /// `test-support` so it never ships in a release build.
    #[cfg(any(test, feature = "test-support"))]
    pub fn register(&self, name: &str, ctor: Ctor<T>) {
        self.overrides.insert(name.to_string(), ctor);
        self.instances.remove(name);
    }

    /// Replaces an existing override and clears its cached instance,
    /// forcing reconstruction on next [`Loader::get`].
    #[cfg(any(test, feature = "test-support"))]
    pub fn replace(&self, name: &str, ctor: Ctor<T>) {
        self.register(name, ctor);
    }
}
