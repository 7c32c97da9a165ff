//! Structural validation and diagnostics reporting for SPI capabilities.
//!
//! This crate has no knowledge of manifests or instance caching — it
//! validates the shape of a capability's registrations before a `Loader`
//! is built, and renders a summary of an already-built `Loader`'s state.

pub mod capability;
pub mod err;
pub mod report;

pub use capability::{validate_adaptive_count, validate_default_name, validate_not_self_referential};
pub use err::{CapabilityError, Result};
pub use report::LoaderReport;
