//! Test-only teardown hook for the process-wide loader registry;
//! production code never invokes it.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]` so it can
//! never be reached from a production build of a dependent crate.

/// Clears every cached [`crate::Loader`] from the process-wide registry.
/// Intended for test suites that register fixture extensions per-test and
/// need a clean slate between them; never call this outside tests.
pub fn reset_registry() {
    spi_ext_loader::reset_registry();
}
