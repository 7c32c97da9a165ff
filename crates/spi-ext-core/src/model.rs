//! The data model shared by every extension point: the `Capability` marker,
//! the type-erased registration record submitted via `inventory::submit!`,
//! and the classification/activation metadata attached to a registration.
//!
//! Rust has no runtime class loading, so the "class" of the source tradition
//! is replaced by a [`ExtensionRegistration`]: a constructor closure plus
//! classification metadata, linked into the binary and discovered through
//! [`inventory`]'s distributed-slice mechanism.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::factory::ExtensionFactory;
use crate::markers::AdaptiveMethodDescriptor;

/// Marker trait every extension point (capability) implements for itself,
/// typically as `impl Capability for dyn Greeter { .. }`.
///
/// `SPI_DEFAULT` is the Rust analogue of the source tradition's
/// class-level `@SPI("name")` annotation: the extension name returned when
/// a caller asks for the default instance without naming one explicitly.
pub trait Capability: Send + Sync + 'static {
    /// The capability's declared default extension name, if any.
    const SPI_DEFAULT: Option<&'static str> = None;

    /// The resource path segment manifests for this capability are searched
    /// under. Defaults to the capability's Rust type name.
    ///
    /// Capabilities are almost always unsized (`dyn Greeter`), so this
    /// takes no `Self: Sized` bound — `type_name` itself is happy to
    /// name an unsized type.
    fn manifest_key() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Every method on this capability carrying an `@Adaptive` marker.
    /// Empty for capabilities with no adaptive methods;
    /// `Loader::adaptive` consults this to distinguish "nothing was ever
    /// adaptive here" (`NoAdaptiveMethod`) from "adaptive methods exist but
    /// nobody registered a dispatcher" (`NoAdaptiveExtension`).
    const ADAPTIVE_METHODS: &'static [AdaptiveMethodDescriptor] = &[];
}

/// How a registration participates in classification.
#[derive(Debug, Clone, Copy)]
pub enum Role {
    /// A plain named extension, optionally auto-activatable.
    Named {
        /// Present when the class-level `Activate` marker was declared.
        activate: Option<ActivateMeta>,
    },
    /// A decorator: constructed from an inner instance of the same
    /// capability.
    Wrapper,
    /// A hand-written adaptive dispatcher (at most one per capability).
    Adaptive,
}

/// Auto-activation metadata. All fields default to "always matches" when
/// empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivateMeta {
    /// Group tags this entry is scoped to; empty matches any group.
    pub group: &'static [&'static str],
    /// URL parameter keys that must carry a non-empty value for this entry
    /// to be considered active; empty means always active.
    pub value: &'static [&'static str],
    /// Names of entries this one must be ordered before.
    pub before: &'static [&'static str],
    /// Names of entries this one must be ordered after.
    pub after: &'static [&'static str],
    /// Numeric tiebreaker, ascending.
    pub order: i32,
}

/// A fully constructed named (or adaptive) instance plus its optional
/// injection hook, type-erased behind `Box<dyn Any>` so it can travel
/// through [`ExtensionRegistration::build`] regardless of capability.
///
/// The injection hook stands in for setter-reflection: capability authors
/// write a small per-instance descriptor by hand and register it alongside
/// the constructor closure instead of relying on runtime introspection.
pub struct NamedBuild<T: ?Sized + 'static> {
    /// The constructed instance.
    pub instance: Arc<T>,
    /// Best-effort dependency injection; failures are logged, not fatal.
    pub inject: Option<fn(&T, &dyn ExtensionFactory)>,
}

/// A wrapper's constructor plus its own injection hook, type-erased the
/// same way as [`NamedBuild`].
pub struct WrapperBuild<T: ?Sized + 'static> {
    /// Builds the wrapper around the previously resolved instance.
    pub wrap: fn(Arc<T>) -> Arc<T>,
    /// Injection applied to the wrapper itself after construction.
    pub inject: Option<fn(&T, &dyn ExtensionFactory)>,
}

/// A single extension entry linked into the binary. Collected globally via
/// `inventory::collect!` and filtered by `capability` at classification
/// time.
pub struct ExtensionRegistration {
    /// `TypeId` of the capability's trait-object type (e.g. `dyn Greeter`).
    pub capability: TypeId,
    /// The capability's type name, carried for diagnostics only.
    pub capability_name: &'static str,
    /// The registration key a manifest's right-hand side must match — the
    /// Rust-native stand-in for a fully-qualified class name.
    pub key: &'static str,
    /// Which classification bucket this registration belongs to.
    pub role: Role,
    /// Produces a `Box<dyn Any>` wrapping either `NamedBuild<T>` or
    /// `WrapperBuild<T>` depending on `role`, where `T` is the concrete
    /// capability this registration was submitted for.
    pub build: fn() -> Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for ExtensionRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistration")
            .field("capability_name", &self.capability_name)
            .field("key", &self.key)
            .field("role", &self.role)
            .finish()
    }
}

inventory::collect!(ExtensionRegistration);

/// Returns every registration submitted for capability `T`.
pub fn registrations_for<T: Capability + ?Sized>() -> impl Iterator<Item = &'static ExtensionRegistration> {
    let target = TypeId::of::<T>();
    inventory::iter::<ExtensionRegistration>()
        .into_iter()
        .filter(move |r| r.capability == target)
}
