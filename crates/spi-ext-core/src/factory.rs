//! `ExtensionFactory`: the injector's own dependency source.
//!
//! `ExtensionFactory` is itself an extension point, which creates a cycle:
//! the injector needs a factory to fill setters, and the factory's adaptive
//! instance is built the same way every other adaptive instance is. The
//! cycle is broken by never running injection on the loader for the
//! `ExtensionFactory` capability itself.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::model::Capability;

/// Supplies a value for `(capability, property_name)` during injection.
///
/// Implementations return `None` rather than erroring when a property isn't
/// known; the injector treats a `None` as "nothing to inject" and moves on,
/// invoking the setter only when a value comes back.
pub trait ExtensionFactory: Send + Sync {
    /// Resolves a value for the given capability type and property name.
    /// Returns the value type-erased as `Arc<dyn T>` boxed behind `Any`;
    /// callers should use [`ExtensionFactoryExt::get`] instead of calling
    /// this directly.
    fn get_extension(
        &self,
        capability: TypeId,
        capability_name: &'static str,
        property_name: &str,
    ) -> Option<Box<dyn Any + Send + Sync>>;
}

/// Ergonomic, strongly-typed front for [`ExtensionFactory`].
pub trait ExtensionFactoryExt: ExtensionFactory {
    /// Resolves `property_name` as an `Arc<T>`, or `None` if this factory
    /// has nothing to offer for it.
    fn get<T: Capability + ?Sized>(&self, property_name: &str) -> Option<Arc<T>> {
        self.get_extension(TypeId::of::<T>(), std::any::type_name::<T>(), property_name)
            .and_then(|boxed| boxed.downcast::<Arc<T>>().ok())
            .map(|boxed| *boxed)
    }
}

impl<F: ExtensionFactory + ?Sized> ExtensionFactoryExt for F {}

/// Tries each factory in order, returning the first non-`None` result.
/// This is the Rust-native analogue of the source tradition's
/// `AdaptiveExtensionFactory`, which fans out over every registered
/// `ExtensionFactory` implementation.
#[derive(Default)]
pub struct CompositeExtensionFactory {
    factories: Vec<Arc<dyn ExtensionFactory>>,
}

impl CompositeExtensionFactory {
    /// Creates an empty composite; add sources with [`Self::push`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a factory to the fan-out order.
    pub fn push(&mut self, factory: Arc<dyn ExtensionFactory>) {
        self.factories.push(factory);
    }
}

impl ExtensionFactory for CompositeExtensionFactory {
    fn get_extension(
        &self,
        capability: TypeId,
        capability_name: &'static str,
        property_name: &str,
    ) -> Option<Box<dyn Any + Send + Sync>> {
        self.factories
            .iter()
            .find_map(|factory| factory.get_extension(capability, capability_name, property_name))
    }
}
