//! Run configuration and the collaborator seams.

use slipway_docs::{DeployGate, DocDeployer, DocGenerator, TriggerContext};
use slipway_publish::{BuildConfig, BuildRunner, RegistryPublisher};
use slipway_tag::{MetadataSource, TagWriter};
use slipway_targets::TargetRegistry;
use slipway_toolchain::{ChannelConfig, ToolchainInstaller};

/// Configuration for one release run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Name of the package under release.
    pub package: String,
    /// The targets to release for, in order.
    pub registry: TargetRegistry,
    /// Toolchain channel identifiers.
    pub channels: ChannelConfig,
    /// Per-target build configuration.
    pub build: BuildConfig,
    /// The doc deployment gate.
    pub gate: DeployGate,
    /// Which ref triggered this run.
    pub trigger: TriggerContext,
    /// Abort the whole run on the first target failure. Default on; with
    /// it off, remaining targets still run so every failure is visible,
    /// but a partial release is never tagged.
    pub fail_fast: bool,
}

impl PipelineConfig {
    /// Config with the built-in registry, default channels, and fail-fast
    /// on.
    pub fn new(
        package: impl Into<String>,
        release_branch: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        let package = package.into();
        PipelineConfig {
            build: BuildConfig::new(package.clone()),
            package,
            registry: TargetRegistry::builtin(),
            channels: ChannelConfig::default(),
            gate: DeployGate::new(release_branch),
            trigger: TriggerContext::new(branch),
            fail_fast: true,
        }
    }
}

/// The external collaborators a run is driven against.
///
/// The orchestrator only decides what arguments to pass each of these and
/// when to invoke them; the tools themselves live behind the seams, so
/// tests substitute in-memory fakes.
pub struct Collaborators<'a> {
    /// Installs toolchains.
    pub installer: &'a dyn ToolchainInstaller,
    /// Compiles the package per target.
    pub builder: &'a dyn BuildRunner,
    /// Submits artifacts to the package registry.
    pub publisher: &'a dyn RegistryPublisher,
    /// Generates per-target documentation.
    pub docs: &'a dyn DocGenerator,
    /// Deploys the public documentation tree.
    pub deployer: &'a dyn DocDeployer,
    /// Resolves the package version for tagging.
    pub metadata: &'a dyn MetadataSource,
    /// Writes the release tag.
    pub tagger: &'a dyn TagWriter,
}
