//! Wrapper composition: applies every discovered
//! `Role::Wrapper` registration around a resolved instance, in
//! discovery order, so the first-discovered wrapper ends up outermost.

use std::any::Any;
use std::sync::Arc;

use spi_ext_core::factory::ExtensionFactory;
use spi_ext_core::model::{Capability, ExtensionRegistration, WrapperBuild};

use crate::inject;

/// Wraps `instance` with every registration in `wrappers`, outermost
/// last in the slice meaning applied last (so it ends up outermost).
///
/// Each wrapper's own injection hook runs against the *wrapper*, not the
/// instance it wraps, mirroring the source tradition's behavior of
/// injecting into the decorator object itself — unless `injection_enabled`
/// is `false`, in which case every wrapper is still applied but no hook
/// runs against any of them.
pub fn compose<T: Capability + ?Sized>(
    mut instance: Arc<T>,
    wrappers: &[&'static ExtensionRegistration],
    factory: &dyn ExtensionFactory,
    injection_enabled: bool,
) -> Arc<T> {
    for registration in wrappers {
        let built: Box<dyn Any + Send + Sync> = (registration.build)();
        let WrapperBuild { wrap, inject } = *built
            .downcast::<WrapperBuild<T>>()
            .unwrap_or_else(|_| panic!("registration `{}` build did not produce WrapperBuild<T>", registration.key));
        instance = wrap(instance);
        if injection_enabled {
            inject::apply(registration.capability_name, instance.as_ref(), inject, factory);
        }
    }
    instance
}

#[cfg(test)]
mod tests {
    use super::*;
    use spi_ext_core::model::Role;
    use std::any::TypeId;
    use std::sync::Mutex;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }
    impl Capability for dyn Greeter {}

    struct Base;
    impl Greeter for Base {
        fn greet(&self) -> String {
            "hi".into()
        }
    }

    struct Loud(Arc<dyn Greeter>);
    impl Greeter for Loud {
        fn greet(&self) -> String {
            format!("{}!", self.0.greet())
        }
    }

    static CALLS: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

    fn build_loud_wrapper() -> Box<dyn Any + Send + Sync> {
        Box::new(WrapperBuild::<dyn Greeter> {
            wrap: |inner| Arc::new(Loud(inner)),
            inject: Some(|_instance, _factory| {
                CALLS.lock().unwrap().push("loud-injected");
            }),
        })
    }

    struct NoFactory;
    impl ExtensionFactory for NoFactory {
        fn get_extension(
            &self,
            _capability: TypeId,
            _capability_name: &'static str,
            _property_name: &str,
        ) -> Option<Box<dyn Any + Send + Sync>> {
            None
        }
    }

    #[test]
    fn composes_wrappers_in_discovery_order_and_injects_each() {
        let registration: &'static ExtensionRegistration = Box::leak(Box::new(ExtensionRegistration {
            capability: TypeId::of::<dyn Greeter>(),
            capability_name: "dyn Greeter",
            key: "wrap_tests::loud",
            role: Role::Wrapper,
            build: build_loud_wrapper,
        }));

        let base: Arc<dyn Greeter> = Arc::new(Base);
        let wrapped = compose::<dyn Greeter>(base, &[registration], &NoFactory, true);
        assert_eq!(wrapped.greet(), "hi!");
        assert_eq!(*CALLS.lock().unwrap(), vec!["loud-injected"]);
    }

    static NO_INJECT_HOOK_RAN: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

    fn build_loud_wrapper_tracking_no_inject() -> Box<dyn Any + Send + Sync> {
        Box::new(WrapperBuild::<dyn Greeter> {
            wrap: |inner| Arc::new(Loud(inner)),
            inject: Some(|_instance, _factory| {
                NO_INJECT_HOOK_RAN.store(true, std::sync::atomic::Ordering::SeqCst);
            }),
        })
    }

    #[test]
    fn injection_disabled_still_wraps_but_skips_every_hook() {
        let registration: &'static ExtensionRegistration = Box::leak(Box::new(ExtensionRegistration {
            capability: TypeId::of::<dyn Greeter>(),
            capability_name: "dyn Greeter",
            key: "wrap_tests::loud_no_inject",
            role: Role::Wrapper,
            build: build_loud_wrapper_tracking_no_inject,
        }));

        let base: Arc<dyn Greeter> = Arc::new(Base);
        let wrapped = compose::<dyn Greeter>(base, &[registration], &NoFactory, false);
        assert_eq!(wrapped.greet(), "hi!");
        assert!(!NO_INJECT_HOOK_RAN.load(std::sync::atomic::Ordering::SeqCst));
    }
}
