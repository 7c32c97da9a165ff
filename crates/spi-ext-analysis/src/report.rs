//! `LoaderReport`: a printable/loggable summary of what a capability
//! resolved to.

use std::fmt;

/// A snapshot of one capability's loader state, assembled from a
/// `Loader<T>`'s public accessors. Not hot-path; intended for startup
/// logging, the Rust analogue of the source tradition's practice of
/// logging extension-loading diagnostics.
#[derive(Debug, Clone)]
pub struct LoaderReport {
    /// The capability's type name.
    pub capability_name: &'static str,
    /// Every name currently resolvable against this capability.
    pub loaded_names: Vec<String>,
    /// How many wrapper registrations were discovered.
    pub wrapper_count: usize,
    /// Whether an adaptive dispatcher is available.
    pub has_adaptive: bool,
    /// Names that failed to resolve, paired with a rendered error.
    pub load_errors: Vec<(String, String)>,
}

impl fmt::Display for LoaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "extension report for {}:", self.capability_name)?;
        writeln!(f, "  names: {}", self.loaded_names.join(", "))?;
        writeln!(f, "  wrappers: {}", self.wrapper_count)?;
        writeln!(f, "  adaptive: {}", self.has_adaptive)?;
        if self.load_errors.is_empty() {
            write!(f, "  errors: none")
        } else {
            write!(f, "  errors:")?;
            for (name, reason) in &self.load_errors {
                write!(f, "\n    {name}: {reason}")?;
            }
            Ok(())
        }
    }
}
