//! Plain-data stand-ins for the source tradition's class/method-level
//! annotations (`SPI`, `Adaptive`, `Activate`, `DisableInject`).
//!
//! Rust has no runtime reflection, so these aren't attributes read off a
//! loaded class — they're ordinary values a capability or extension author
//! writes down once, next to the `inventory::submit!` that registers the
//! extension. [`ActivateMeta`] already lives in [`crate::model`] since it's
//! attached directly to [`crate::model::ExtensionRegistration::role`];
//! what remains here is the per-method `Adaptive(keys)` declaration, which
//! belongs to the capability rather than to any one extension.

/// The `value[]` keys declared by an `@Adaptive` method marker. An empty
/// slice means "derive the key from the capability's simple name" (see
/// [`crate::utils::derive_adaptive_key`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveKeys {
    /// URL parameter keys tried in order, each falling back to the next.
    pub keys: &'static [&'static str],
    /// Whether this method also takes a framework invocation carrying a
    /// method name, in which case lookups use `method_parameter_or`
    /// instead of `parameter_or`.
    pub uses_invocation_method: bool,
}

impl AdaptiveKeys {
    /// A method marked `@Adaptive` with no explicit keys.
    pub const DERIVE: Self = Self {
        keys: &[],
        uses_invocation_method: false,
    };

    /// Declares explicit lookup keys.
    pub const fn keyed(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            uses_invocation_method: false,
        }
    }

    /// Declares explicit lookup keys, scoped per invocation method name.
    pub const fn keyed_by_method(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            uses_invocation_method: true,
        }
    }
}

/// Declares one `@Adaptive`-marked method on a capability. A capability
/// must declare at least one of these for `Loader::adaptive` to succeed.
///
/// A capability that defines any adaptive methods lists them via
/// [`crate::model::Capability::ADAPTIVE_METHODS`]; the hand-written
/// dispatcher registered as `Role::Adaptive` for that capability uses
/// [`AdaptiveKeys`] from the matching entry to resolve an extension name at
/// call time (the logic lives in the sibling `spi-ext-codegen` crate, which
/// depends only on these plain-data descriptors).
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveMethodDescriptor {
    /// The method's name, used for per-invocation key scoping and for
    /// diagnostics.
    pub method_name: &'static str,
    /// How this method resolves its extension name from a URL.
    pub keys: AdaptiveKeys,
    /// Whether the method has a reachable `UrlLike` argument to read from.
    /// A capability author sets this to `false` only to describe a method
    /// that was marked adaptive but has no URL-typed parameter and no
    /// parameter exposing one, which synthesis rejects as `NoUrlSource`.
    pub has_url_source: bool,
}

