//! Build/publish seam traits and the cargo-backed implementation.

use std::path::PathBuf;
use std::process::{Command, Output};

use slipway_targets::Target;
use slipway_toolchain::InstalledToolchain;

use crate::config::{BuildConfig, RegistryToken, SdkConfig, BUILD_STD_ARGS};
use crate::error::{PublishError, Result};

/// The output of compiling the package for one target.
///
/// Ephemeral: consumed immediately by the publish step, never persisted
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    /// The package that was built.
    pub package: String,
    /// The triple it was built for.
    pub triple: String,
    /// The channel override it was built with.
    pub channel: String,
}

/// Outcome of submitting an artifact to the registry.
///
/// On success, carries the now-canonical version string for the package.
/// The version is identical across all targets in a run, since it
/// originates from one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The triple this publish covered.
    pub triple: String,
    /// The canonical published version.
    pub version: semver::Version,
}

/// Compiles the package for one target.
pub trait BuildRunner {
    /// Build `config.package` for `target` using `toolchain`.
    fn build(
        &self,
        toolchain: &InstalledToolchain,
        target: &Target,
        config: &BuildConfig,
    ) -> Result<BuildArtifact>;
}

/// Submits a built artifact to the package registry.
pub trait RegistryPublisher {
    /// Publish `artifact`, authenticating with `token`.
    fn publish(&self, artifact: &BuildArtifact, token: &RegistryToken) -> Result<PublishOutcome>;
}

/// Cargo-backed driver implementing both seams.
///
/// Build: `cargo +<channel> build --release --target <triple>` with the
/// std-rebuild flags and the SDK environment overrides. Publish:
/// `cargo +<channel> publish --target <triple> --token <token>` with the
/// same flags, then the version is read back via `cargo pkgid`.
#[derive(Debug, Clone, Default)]
pub struct CargoDriver {
    /// Working directory for cargo invocations (package root).
    pub workdir: Option<PathBuf>,
}

impl CargoDriver {
    /// Driver rooted at the package directory.
    pub fn new(workdir: PathBuf) -> Self {
        CargoDriver {
            workdir: Some(workdir),
        }
    }

    fn cargo(&self, toolchain: &InstalledToolchain, sdk: &SdkConfig) -> Command {
        let mut cmd = Command::new("cargo");
        cmd.arg(toolchain.override_arg());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd.envs(sdk.env.iter());
        cmd
    }

    fn run(&self, mut cmd: Command) -> Result<Output> {
        cmd.output().map_err(|source| PublishError::Spawn {
            tool: "cargo".to_string(),
            source,
        })
    }

    /// Resolve the manifest version of `package` via `cargo pkgid`, which
    /// prints `name@version` (possibly prefixed with a source URL).
    fn resolve_version(&self, toolchain: &InstalledToolchain, package: &str) -> Result<semver::Version> {
        let mut cmd = Command::new("cargo");
        cmd.arg(toolchain.override_arg()).args(["pkgid", "-p", package]);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        let output = self.run(cmd)?;
        if !output.status.success() {
            return Err(PublishError::Version {
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let pkgid = String::from_utf8_lossy(&output.stdout);
        parse_pkgid_version(pkgid.trim()).ok_or_else(|| PublishError::Version {
            detail: format!("unparseable pkgid: '{}'", pkgid.trim()),
        })
    }
}

/// Classify a failed publish from the registry client's stderr. A 401/403
/// status or the registry's login prompt means the shared credential is
/// bad, which aborts the whole run; every other failure is a rejection
/// surfaced verbatim.
pub(crate) fn classify_publish_failure(stderr: String) -> PublishError {
    let credential_rejected = stderr.contains("401")
        || stderr.contains("403")
        || stderr.contains("must be logged in")
        || stderr.contains("please provide a token");
    if credential_rejected {
        PublishError::Auth { detail: stderr }
    } else {
        PublishError::Rejected { detail: stderr }
    }
}

/// Extract the version from a pkgid like
/// `registry+https://github.com/rust-lang/crates.io-index#esp-hal@1.2.3`
/// or the short form `esp-hal@1.2.3`.
pub(crate) fn parse_pkgid_version(pkgid: &str) -> Option<semver::Version> {
    let tail = pkgid.rsplit('#').next()?;
    let version = tail.rsplit('@').next()?;
    semver::Version::parse(version).ok()
}

impl BuildRunner for CargoDriver {
    fn build(
        &self,
        toolchain: &InstalledToolchain,
        target: &Target,
        config: &BuildConfig,
    ) -> Result<BuildArtifact> {
        let sdk = SdkConfig::from_build_config(config)?;
        let mut cmd = self.cargo(toolchain, &sdk);
        cmd.args(["build", "-p", &config.package, "--target", &target.triple]);
        if config.release {
            cmd.arg("--release");
        }
        cmd.args(BUILD_STD_ARGS);

        let output = self.run(cmd)?;
        if !output.status.success() {
            return Err(PublishError::Compile {
                triple: target.triple.clone(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(BuildArtifact {
            package: config.package.clone(),
            triple: target.triple.clone(),
            channel: toolchain.channel.clone(),
        })
    }
}

impl RegistryPublisher for CargoDriver {
    fn publish(&self, artifact: &BuildArtifact, token: &RegistryToken) -> Result<PublishOutcome> {
        let toolchain = InstalledToolchain {
            channel: artifact.channel.clone(),
            triple: artifact.triple.clone(),
        };
        let mut cmd = self.cargo(&toolchain, &SdkConfig::default());
        cmd.args([
            "publish",
            "-p",
            &artifact.package,
            "--target",
            &artifact.triple,
            "--token",
            token.reveal(),
        ]);
        cmd.args(BUILD_STD_ARGS);

        let output = self.run(cmd)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(classify_publish_failure(stderr));
        }

        let version = self.resolve_version(&toolchain, &artifact.package)?;
        Ok(PublishOutcome {
            triple: artifact.triple.clone(),
            version,
        })
    }
}
