//! Structural checks run once per capability, before a `Loader` starts
//! resolving any name against it.

use spi_ext_core::model::ActivateMeta;

use crate::err::{CapabilityError, Result};

/// Validates that a capability's declared default name, if any, is a
/// single whitespace-free token.
///
/// `SPI_DEFAULT` is plain Rust data rather than something a compiler can
/// enforce to be well-formed, so this check stands in for the source
/// tradition's eager validation of a malformed `@SPI` annotation.
pub fn validate_default_name(capability_name: &'static str, default: Option<&'static str>) -> Result<()> {
    match default {
        None => Ok(()),
        Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => Ok(()),
        Some(name) => Err(CapabilityError::InvalidDefaultName {
            capability: capability_name,
            default: name,
        }),
    }
}

/// Validates that at most one registration claimed the adaptive role.
pub fn validate_adaptive_count(capability_name: &'static str, count: usize) -> Result<()> {
    if count > 1 {
        Err(CapabilityError::DuplicateAdaptive {
            capability: capability_name,
            count,
        })
    } else {
        Ok(())
    }
}

/// Validates that an extension's own resolved name doesn't appear in its
/// own `before`/`after` lists.
pub fn validate_not_self_referential(
    capability_name: &'static str,
    name: &str,
    meta: &ActivateMeta,
) -> Result<()> {
    if meta.before.contains(&name) || meta.after.contains(&name) {
        Err(CapabilityError::SelfReferentialActivation {
            capability: capability_name,
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}
