//! Validates a capability's declared adaptive methods before a dispatcher
//! is built for them.
//!
//! There's no per-call "compile this source text" step in this workspace
//! (see `dispatch.rs`'s module doc), so the adaptive proxy synthesizer's
//! precondition check collapses to validating the static
//! [`AdaptiveMethodDescriptor`] list a capability declares, once, before
//! `Loader::adaptive` is ever asked to resolve one.

use spi_ext_core::markers::AdaptiveMethodDescriptor;
use tracing::warn;

use crate::err::{Result, SynthesisError};

/// Validates that `methods` is non-empty (a capability with zero declared
/// adaptive methods yields `NoAdaptiveMethod`) and that every declared
/// method has a reachable URL source (`NoUrlSource` otherwise).
pub fn validate_methods(capability: &'static str, methods: &'static [AdaptiveMethodDescriptor]) -> Result<()> {
    if methods.is_empty() {
        warn!(capability, "no method marked adaptive, adaptive dispatcher unavailable");
        return Err(SynthesisError::NoAdaptiveMethod { capability });
    }
    for method in methods {
        if !method.has_url_source {
            warn!(capability, method = method.method_name, "adaptive method has no reachable URL source");
            return Err(SynthesisError::NoUrlSource {
                capability,
                method: method.method_name,
            });
        }
    }
    Ok(())
}
