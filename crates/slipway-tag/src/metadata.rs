//! Package metadata lookup.

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::error::{Result, TagError};

/// Abstract source of package metadata.
///
/// Implementations resolve the version string for a named package. The
/// lookup must match exactly one package; zero or multiple matches is a
/// fatal configuration error.
pub trait MetadataSource {
    /// Resolve the manifest version of `name`.
    fn package_version(&self, name: &str) -> Result<semver::Version>;
}

#[derive(Deserialize)]
struct MetadataDoc {
    packages: Vec<PackageEntry>,
}

#[derive(Deserialize)]
struct PackageEntry {
    name: String,
    version: String,
}

/// Resolve a package version from a `cargo metadata --format-version 1`
/// JSON document. Shared by the process-backed source and tests.
pub(crate) fn version_from_metadata_json(json: &str, name: &str) -> Result<semver::Version> {
    let doc: MetadataDoc = serde_json::from_str(json)?;
    let matches: Vec<&PackageEntry> =
        doc.packages.iter().filter(|p| p.name == name).collect();
    match matches.len() {
        0 => Err(TagError::PackageNotFound {
            name: name.to_string(),
        }),
        1 => Ok(semver::Version::parse(&matches[0].version)?),
        count => Err(TagError::AmbiguousPackage {
            name: name.to_string(),
            count,
        }),
    }
}

/// `cargo metadata`-backed source.
#[derive(Debug, Clone, Default)]
pub struct CargoMetadataSource {
    /// Working directory for the metadata query (package root).
    pub workdir: Option<PathBuf>,
}

impl CargoMetadataSource {
    /// Source rooted at the package directory.
    pub fn new(workdir: PathBuf) -> Self {
        CargoMetadataSource {
            workdir: Some(workdir),
        }
    }
}

impl MetadataSource for CargoMetadataSource {
    fn package_version(&self, name: &str) -> Result<semver::Version> {
        let mut cmd = Command::new("cargo");
        cmd.args(["metadata", "--format-version", "1", "--no-deps"]);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        let output = cmd.output().map_err(|source| TagError::Spawn {
            tool: "cargo".to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(TagError::Metadata {
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let json = String::from_utf8_lossy(&output.stdout);
        version_from_metadata_json(&json, name)
    }
}
