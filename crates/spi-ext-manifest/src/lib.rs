//! Manifest discovery and parsing for the SPI extension loader.
//!
//! Translates the `META-INF/{internal-dubbo,dubbo,services}/<capability>`
//! resource convention into [`ManifestEntry`] records the loader crate
//! classifies and caches.

pub mod entry;
pub mod err;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod source;

pub use entry::ManifestEntry;
pub use err::{ManifestError, Result};
pub use parser::read_manifest;
pub use position::{LineNo, Origin, Span};
pub use source::{FsManifestSource, ManifestSource, MemoryManifestSource, SEARCH_DIRECTORIES};
