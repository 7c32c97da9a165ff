//! Partitions a capability's linked-in registrations into the four
//! classification buckets: named, wrapper, adaptive, and the `Activate`
//! metadata attached to named entries.

use std::collections::HashMap;

use spi_ext_analysis::validate_adaptive_count;
use spi_ext_core::model::{Capability, ExtensionRegistration, Role};

use crate::err::Result;

/// The registrations discovered for a capability, keyed by registration
/// key rather than by name (name assignment happens later, from the
/// manifest).
pub struct Classification {
    /// `Role::Named` registrations, by registration key.
    pub named: HashMap<&'static str, &'static ExtensionRegistration>,
    /// `Role::Wrapper` registrations, in discovery (link/iteration)
    /// order — wrapper composition applies them in this order.
    pub wrappers: Vec<&'static ExtensionRegistration>,
    /// The single `Role::Adaptive` registration, if any.
    pub adaptive: Option<&'static ExtensionRegistration>,
    /// Discovery order of every registration, by key — used as the
    /// activation comparator's final tiebreak.
    pub discovery_index: HashMap<&'static str, usize>,
}

/// Builds a [`Classification`] for capability `T`, validating that at
/// most one registration claims the adaptive role.
pub fn classify<T: Capability + ?Sized>() -> Result<Classification> {
    let mut named = HashMap::new();
    let mut wrappers = Vec::new();
    let mut adaptive_candidates = Vec::new();
    let mut discovery_index = HashMap::new();

    for (index, registration) in spi_ext_core::model::registrations_for::<T>().enumerate() {
        discovery_index.insert(registration.key, index);
        match registration.role {
            Role::Named { .. } => {
                named.insert(registration.key, registration);
            }
            Role::Wrapper => wrappers.push(registration),
            Role::Adaptive => adaptive_candidates.push(registration),
        }
    }

    validate_adaptive_count(std::any::type_name::<T>(), adaptive_candidates.len())?;

    Ok(Classification {
        named,
        wrappers,
        adaptive: adaptive_candidates.into_iter().next(),
        discovery_index,
    })
}
