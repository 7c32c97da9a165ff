//! Abstracts where manifest resources come from, so the reader can be
//! driven off the filesystem in production and off an in-memory fixture in
//! tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::err::{ManifestError, Result};

/// The three search directories, in precedence order: internal extensions
/// take priority over vendor extensions, which take priority over
/// user-supplied extensions.
pub const SEARCH_DIRECTORIES: [&str; 3] = ["internal-dubbo", "dubbo", "services"];

/// Supplies the raw text of a capability's manifest resource from one
/// search directory, if present there.
pub trait ManifestSource: Send + Sync {
    /// Reads the resource named `capability_key` (the capability's
    /// fully-qualified registration key) from `directory`.
    ///
    /// Returns `Ok(None)` when the resource does not exist in that
    /// directory — this is the normal case for two of the three
    /// directories on most lookups.
    fn read(&self, directory: &str, capability_key: &str) -> Result<Option<String>>;
}

/// Reads manifests from `<root>/META-INF/<directory>/<capability_key>`,
/// mirroring a classpath-resource layout.
pub struct FsManifestSource {
    root: PathBuf,
}

impl FsManifestSource {
    /// Creates a source rooted at `root` (typically a `META-INF` ancestor).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, directory: &str, capability_key: &str) -> PathBuf {
        self.root.join("META-INF").join(directory).join(capability_key)
    }
}

impl ManifestSource for FsManifestSource {
    fn read(&self, directory: &str, capability_key: &str) -> Result<Option<String>> {
        let path = self.path_for(directory, capability_key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ManifestError::Unreadable {
                resource: path.display().to_string(),
                reason: source.to_string(),
            }),
        }
    }
}

/// An in-memory manifest source for tests, keyed by `(directory,
/// capability_key)`.
#[derive(Debug, Default, Clone)]
pub struct MemoryManifestSource {
    resources: BTreeMap<(String, String), String>,
}

impl MemoryManifestSource {
    /// Creates an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `contents` as the resource found in `directory` under
    /// `capability_key`.
    pub fn with_resource(
        mut self,
        directory: &str,
        capability_key: &str,
        contents: impl Into<String>,
    ) -> Self {
        self.resources
            .insert((directory.to_string(), capability_key.to_string()), contents.into());
        self
    }
}

impl ManifestSource for MemoryManifestSource {
    fn read(&self, directory: &str, capability_key: &str) -> Result<Option<String>> {
        Ok(self
            .resources
            .get(&(directory.to_string(), capability_key.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_returns_none_when_absent() {
        let source = MemoryManifestSource::new();
        assert!(source.read("dubbo", "Greeter").unwrap().is_none());
    }

    #[test]
    fn memory_source_returns_registered_resource() {
        let source = MemoryManifestSource::new().with_resource("dubbo", "Greeter", "en=pkg.English");
        assert_eq!(
            source.read("dubbo", "Greeter").unwrap(),
            Some("en=pkg.English".to_string())
        );
    }

    #[test]
    fn fs_source_reports_missing_root_as_absent() {
        let source = FsManifestSource::new("/nonexistent/root/path/for/tests");
        assert!(source.read("dubbo", "Greeter").unwrap().is_none());
    }

    #[test]
    fn fs_source_reads_a_resource_laid_out_on_a_real_filesystem() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let resource_dir = dir.path().join("META-INF").join("dubbo");
        fs::create_dir_all(&resource_dir).expect("create resource directory");
        fs::write(resource_dir.join("Greeter"), "en=pkg.EnglishGreeter\n").expect("write resource");

        let source = FsManifestSource::new(dir.path());
        assert_eq!(
            source.read("dubbo", "Greeter").unwrap(),
            Some("en=pkg.EnglishGreeter\n".to_string())
        );
        assert!(source.read("internal-dubbo", "Greeter").unwrap().is_none());
    }
}
