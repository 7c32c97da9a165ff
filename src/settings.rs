//! Process-wide loader configuration: layered files plus environment
//! overrides via the `config` crate.
//!
//! Nothing about the loader's core semantics requires configuration beyond
//! the manifest search roots themselves; this module exists because the
//! ambient stack carries a `config`-driven settings type regardless, the
//! same way a language server's state module loads its settings.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::err::Result;

/// Runtime-tunable knobs for the extension loader.
///
/// None of these change the loader's core semantics — they control where
/// manifests are searched and whether injection runs at all, both of which
/// are left to the embedding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Filesystem root manifests are searched under (an ancestor of
    /// `META-INF/{internal-dubbo,dubbo,services}`).
    #[serde(default = "default_manifest_root")]
    pub manifest_root: PathBuf,

    /// Whether `Loader::get`/`Loader::adaptive` run the injector at all.
    /// Disabling this is useful for tests that want bare, uninjected
    /// instances.
    #[serde(default = "default_injection_enabled")]
    pub injection_enabled: bool,
}

fn default_manifest_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_injection_enabled() -> bool {
    true
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            manifest_root: default_manifest_root(),
            injection_enabled: default_injection_enabled(),
        }
    }
}

impl LoaderSettings {
    /// Loads settings from `config/default.{toml,yaml,...}`, an optional
    /// `config/local` override, and `SPI_EXT_`-prefixed environment
    /// variables, falling back to [`Default`] values for anything unset.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("SPI_EXT"))
            .build()?;

        match config.try_deserialize() {
            Ok(settings) => Ok(settings),
            Err(_) => Ok(Self::default()),
        }
    }
}
