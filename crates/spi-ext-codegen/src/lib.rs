//! Adaptive proxy synthesis for the SPI extension loader.
//!
//! A "synthesized" dispatcher in this workspace is a small, hand-written
//! `struct` implementing the capability and registered as `Role::Adaptive`
//! like any other extension; what this crate supplies is the reusable
//! call-time logic such a dispatcher's methods call into — the URL lookup
//! cascade ([`dispatch::resolve_extension_name`]) and the precondition
//! checks that run before one is built ([`plan::validate_methods`]). This
//! crate never generates or compiles source text at runtime: Rust has no
//! analogue of loading freshly compiled bytecode, so the dispatcher is
//! written once, by hand, at the time the capability's crate is authored.

pub mod dispatch;
pub mod err;
pub mod plan;

pub use dispatch::{require_url, resolve_extension_name};
pub use err::{Result, SynthesisError};
pub use plan::validate_methods;
