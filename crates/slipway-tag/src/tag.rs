//! Tag name formatting and the tag writer seam.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, TagError};
use crate::metadata::MetadataSource;

/// An immutable, version-named marker recording a completed release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    /// The tag name (`v<version>`).
    pub name: String,
    /// The version it records.
    pub version: semver::Version,
    /// The annotation message.
    pub message: String,
}

/// Deterministic tag name for a version: `"v" + version`.
pub fn tag_name(version: &semver::Version) -> String {
    format!("v{version}")
}

/// Abstract tag writer.
///
/// `create` must fail with [`TagError::TagExists`] if the name is already
/// taken; creating the same tag twice is an error, not a no-op.
pub trait TagWriter {
    /// Create an annotated tag `name` with `message`.
    fn create(&self, name: &str, message: &str) -> Result<()>;
}

/// Git-backed tag writer: `git tag -a <name> -m <message>` followed by a
/// push of the tag ref.
#[derive(Debug, Clone, Default)]
pub struct GitTagWriter {
    /// Repository directory.
    pub workdir: Option<PathBuf>,
    /// Remote to push the tag to, if any.
    pub push_remote: Option<String>,
}

impl GitTagWriter {
    /// Writer rooted at the repository directory.
    pub fn new(workdir: PathBuf) -> Self {
        GitTagWriter {
            workdir: Some(workdir),
            push_remote: None,
        }
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd.output().map_err(|source| TagError::Spawn {
            tool: "git".to_string(),
            source,
        })
    }
}

impl TagWriter for GitTagWriter {
    fn create(&self, name: &str, message: &str) -> Result<()> {
        let output = self.git(&["tag", "-a", name, "-m", message])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("already exists") {
                return Err(TagError::TagExists {
                    name: name.to_string(),
                });
            }
            return Err(TagError::WriteFailed { detail: stderr });
        }

        if let Some(remote) = &self.push_remote {
            let output = self.git(&["push", remote, name])?;
            if !output.status.success() {
                return Err(TagError::WriteFailed {
                    detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Cut the release tag for `package`.
///
/// Resolves the version from metadata (which must match exactly one
/// package), formats the tag name, and writes the annotated tag. Tag
/// creation is not attempted if the version cannot be resolved.
pub fn cut_release(
    metadata: &dyn MetadataSource,
    writer: &dyn TagWriter,
    package: &str,
) -> Result<ReleaseTag> {
    let version = metadata.package_version(package)?;
    let name = tag_name(&version);
    let message = format!("{package} release {version}");
    writer.create(&name, &message)?;
    Ok(ReleaseTag {
        name,
        version,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    /// In-memory tag store enforcing name uniqueness.
    pub struct FakeTagStore {
        tags: RefCell<BTreeSet<String>>,
    }

    impl FakeTagStore {
        pub fn new() -> Self {
            FakeTagStore {
                tags: RefCell::new(BTreeSet::new()),
            }
        }

        pub fn contains(&self, name: &str) -> bool {
            self.tags.borrow().contains(name)
        }
    }

    impl TagWriter for FakeTagStore {
        fn create(&self, name: &str, _message: &str) -> Result<()> {
            let mut tags = self.tags.borrow_mut();
            if !tags.insert(name.to_string()) {
                return Err(TagError::TagExists {
                    name: name.to_string(),
                });
            }
            Ok(())
        }
    }

    struct FixedMetadata {
        result: std::result::Result<semver::Version, &'static str>,
    }

    impl MetadataSource for FixedMetadata {
        fn package_version(&self, name: &str) -> Result<semver::Version> {
            match &self.result {
                Ok(v) => Ok(v.clone()),
                Err("ambiguous") => Err(TagError::AmbiguousPackage {
                    name: name.to_string(),
                    count: 2,
                }),
                Err(_) => Err(TagError::PackageNotFound {
                    name: name.to_string(),
                }),
            }
        }
    }

    #[test]
    fn tag_name_is_v_prefixed_version() {
        assert_eq!(tag_name(&semver::Version::new(3, 1, 0)), "v3.1.0");
        assert_eq!(tag_name(&semver::Version::new(0, 45, 2)), "v0.45.2");
        let pre = semver::Version::parse("1.0.0-beta.1").unwrap();
        assert_eq!(tag_name(&pre), "v1.0.0-beta.1");
    }

    #[test]
    fn cut_release_writes_tag_with_version_in_message() {
        let metadata = FixedMetadata {
            result: Ok(semver::Version::new(3, 1, 0)),
        };
        let store = FakeTagStore::new();

        let tag = cut_release(&metadata, &store, "esp-hal").unwrap();
        assert_eq!(tag.name, "v3.1.0");
        assert_eq!(tag.message, "esp-hal release 3.1.0");
        assert!(store.contains("v3.1.0"));
    }

    #[test]
    fn duplicate_tag_is_surfaced_not_ignored() {
        let metadata = FixedMetadata {
            result: Ok(semver::Version::new(3, 1, 0)),
        };
        let store = FakeTagStore::new();

        cut_release(&metadata, &store, "esp-hal").unwrap();
        let rerun = cut_release(&metadata, &store, "esp-hal");
        assert!(matches!(
            rerun,
            Err(TagError::TagExists { name }) if name == "v3.1.0"
        ));
    }

    #[test]
    fn unresolvable_version_creates_no_tag() {
        let metadata = FixedMetadata {
            result: Err("missing"),
        };
        let store = FakeTagStore::new();

        let result = cut_release(&metadata, &store, "esp-hal");
        assert!(matches!(result, Err(TagError::PackageNotFound { .. })));
        assert!(!store.contains("v3.1.0"));
    }

    #[test]
    fn ambiguous_package_creates_no_tag() {
        let metadata = FixedMetadata {
            result: Err("ambiguous"),
        };
        let store = FakeTagStore::new();

        let result = cut_release(&metadata, &store, "esp-hal");
        assert!(matches!(
            result,
            Err(TagError::AmbiguousPackage { count: 2, .. })
        ));
        assert!(!store.contains("v3.1.0"));
    }
}
