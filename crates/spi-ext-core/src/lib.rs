//! Core data model for the SPI extension loader.
//!
//! This crate has no knowledge of manifests, caches, or injection — it
//! defines the vocabulary ([`Capability`](model::Capability),
//! [`ExtensionRegistration`](model::ExtensionRegistration),
//! [`ExtensionFactory`](factory::ExtensionFactory),
//! [`UrlLike`](url::UrlLike)) that every other crate in the workspace
//! builds on.

pub mod factory;
pub mod markers;
pub mod model;
pub mod url;
pub mod utils;

/// Re-exports the pieces most callers need.
pub mod prelude {
    pub use crate::factory::{CompositeExtensionFactory, ExtensionFactory, ExtensionFactoryExt};
    pub use crate::markers::{AdaptiveKeys, AdaptiveMethodDescriptor};
    pub use crate::model::{
        ActivateMeta, Capability, ExtensionRegistration, NamedBuild, Role, WrapperBuild,
    };
    pub use crate::url::{SimpleUrl, UrlLike};
}
