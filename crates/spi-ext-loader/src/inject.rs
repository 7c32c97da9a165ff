//! Best-effort dependency injection.
//!
//! There is no setter reflection in Rust, so the "introspect setters,
//! call the ones whose property type is itself an extension point"
//! algorithm is replaced by a hand-written injection hook carried
//! alongside the constructor (see [`spi_ext_core::model::NamedBuild::inject`]).
//! What's preserved is the failure mode: injection failures are logged
//! and otherwise ignored, never propagated as a hard error.

use spi_ext_core::factory::ExtensionFactory;
use tracing::trace;

/// Runs `inject`, if present, against `instance`. Never fails — a hook
/// that can't find what it needs is expected to log its own warning and
/// no-op, the way `DisableInject`-equivalent extensions simply register
/// no hook at all and are skipped silently here.
pub fn apply<T: ?Sized>(
    capability_name: &'static str,
    instance: &T,
    inject: Option<fn(&T, &dyn ExtensionFactory)>,
    factory: &dyn ExtensionFactory,
) {
    match inject {
        Some(inject) => inject(instance, factory),
        None => trace!(capability = capability_name, "no injection hook registered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::{Any, TypeId};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Plain;

    mockall::mock! {
        Factory {}
        impl ExtensionFactory for Factory {
            fn get_extension(
                &self,
                capability: TypeId,
                capability_name: &'static str,
                property_name: &str,
            ) -> Option<Box<dyn Any + Send + Sync>>;
        }
    }

    static HOOK_RAN: AtomicBool = AtomicBool::new(false);

    #[test]
    fn apply_invokes_the_hook_and_lets_it_consult_the_factory() {
        HOOK_RAN.store(false, Ordering::SeqCst);
        let mut factory = MockFactory::new();
        factory
            .expect_get_extension()
            .times(1)
            .returning(|_, _, _| None);

        apply::<Plain>(
            "dyn Greeter",
            &Plain,
            Some(|_instance, factory| {
                HOOK_RAN.store(true, Ordering::SeqCst);
                let _ = factory.get_extension(TypeId::of::<Plain>(), "dyn Greeter", "inner");
            }),
            &factory,
        );
        // `factory` drops at the end of scope, at which point mockall
        // verifies the `times(1)` expectation was satisfied.
        assert!(HOOK_RAN.load(Ordering::SeqCst));
    }

    #[tracing_test::traced_test]
    #[test]
    fn missing_hook_is_a_silent_no_op() {
        let factory = MockFactory::new();
        // Nothing to wire up; this only has to not panic and not call
        // through to the factory at all.
        apply::<Plain>("dyn Greeter", &Plain, None, &factory);
    }
}
