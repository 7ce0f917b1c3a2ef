//! Build configuration, SDK environment overrides, and the registry
//! credential.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PublishError, Result};

/// Target-invariant flags for the standard-library rebuild. Every target in
/// a run builds with the same set.
pub const BUILD_STD_ARGS: &[&str] = &["-Zbuild-std=std,panic_abort"];

/// Build configuration for one release run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Name of the package under release.
    pub package: String,
    /// Path to the per-target SDK configuration file, if any.
    pub sdk_config: Option<PathBuf>,
    /// Build in release mode.
    pub release: bool,
}

impl BuildConfig {
    /// A release-mode config for `package` with no SDK overrides.
    pub fn new(package: impl Into<String>) -> Self {
        BuildConfig {
            package: package.into(),
            sdk_config: None,
            release: true,
        }
    }
}

/// Environment/path overrides required for a target family's SDK, loaded
/// from a TOML file with an `[env]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkConfig {
    /// Variables injected into every build-tool invocation.
    pub env: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct SdkDoc {
    #[serde(default)]
    env: BTreeMap<String, String>,
}

impl SdkConfig {
    /// Load SDK overrides from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PublishError::SdkConfig {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let doc: SdkDoc = toml::from_str(&content).map_err(|e| PublishError::SdkConfig {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Ok(SdkConfig { env: doc.env })
    }

    /// Load from the config's path, or an empty set if none configured.
    pub fn from_build_config(config: &BuildConfig) -> Result<Self> {
        match &config.sdk_config {
            Some(path) => SdkConfig::load(path),
            None => Ok(SdkConfig::default()),
        }
    }
}

/// The registry authentication credential.
///
/// Shared read-only across target pipelines. The `Debug` impl redacts the
/// secret so it cannot leak through error chains or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryToken(String);

impl RegistryToken {
    /// Wrap a token value.
    pub fn new(token: impl Into<String>) -> Self {
        RegistryToken(token.into())
    }

    /// Read the token from an environment variable.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().filter(|v| !v.is_empty()).map(RegistryToken)
    }

    /// Expose the secret for passing to the registry client.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RegistryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegistryToken(<redacted>)")
    }
}
