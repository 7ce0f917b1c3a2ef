//! `slipway.toml` manifest parsing and release configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use slipway_docs::{DeployGate, TriggerContext};
use slipway_pipeline::PipelineConfig;
use slipway_publish::BuildConfig;
use slipway_targets::{Target, TargetRegistry};
use slipway_toolchain::ChannelConfig;

/// The top-level manifest structure for a Slipway project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SlipwayManifest {
    /// Release metadata (required).
    pub release: ReleaseSection,
    /// Toolchain channel overrides.
    #[serde(default)]
    pub toolchain: Option<ToolchainSection>,
    /// Per-target SDK configuration.
    #[serde(default)]
    pub sdk: Option<SdkSection>,
    /// Documentation deployment destination.
    #[serde(default)]
    pub docs: Option<DocsSection>,
    /// Release targets. Empty means the built-in matrix.
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// Release metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseSection {
    /// Name of the package under release (required).
    pub package: String,
    /// The designated release branch.
    #[serde(default = "default_release_branch")]
    pub release_branch: String,
    /// Abort the run on the first target failure.
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,
}

fn default_release_branch() -> String {
    "main".to_string()
}

fn default_fail_fast() -> bool {
    true
}

/// Toolchain channel overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainSection {
    /// Channel carrying the vendored Xtensa compiler.
    #[serde(default)]
    pub xtensa_channel: Option<String>,
    /// Upstream channel for the RISC-V variants.
    #[serde(default)]
    pub riscv_channel: Option<String>,
}

/// SDK configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SdkSection {
    /// Path to the SDK environment-override file.
    #[serde(default)]
    pub config: Option<String>,
}

/// Documentation deployment section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DocsSection {
    /// Git remote the site branch is pushed to.
    #[serde(default)]
    pub site_remote: Option<String>,
    /// Site branch name.
    #[serde(default = "default_site_branch")]
    pub site_branch: String,
    /// Local directory site root (takes precedence over the remote).
    #[serde(default)]
    pub site_dir: Option<String>,
}

fn default_site_branch() -> String {
    "gh-pages".to_string()
}

impl SlipwayManifest {
    /// Search upward from `start_dir` for a `slipway.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("slipway.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: SlipwayManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing slipway.toml")
    }

    /// The target registry: manifest targets, or the built-in matrix.
    pub fn registry(&self) -> Result<TargetRegistry> {
        if self.targets.is_empty() {
            return Ok(TargetRegistry::builtin());
        }
        TargetRegistry::new(self.targets.clone()).context("validating [[targets]]")
    }

    /// Toolchain channels: manifest overrides on top of the defaults.
    pub fn channels(&self) -> ChannelConfig {
        let mut channels = ChannelConfig::default();
        if let Some(section) = &self.toolchain {
            if let Some(xtensa) = &section.xtensa_channel {
                channels.xtensa_channel = xtensa.clone();
            }
            if let Some(riscv) = &section.riscv_channel {
                channels.riscv_channel = riscv.clone();
            }
        }
        channels
    }

    /// Assemble the pipeline configuration for a run triggered from
    /// `branch`, with `fail_fast` optionally forced off.
    pub fn pipeline_config(
        &self,
        project_dir: &Path,
        branch: &str,
        no_fail_fast: bool,
    ) -> Result<PipelineConfig> {
        let mut build = BuildConfig::new(self.release.package.clone());
        if let Some(sdk) = &self.sdk {
            if let Some(config_path) = &sdk.config {
                build.sdk_config = Some(project_dir.join(config_path));
            }
        }
        Ok(PipelineConfig {
            package: self.release.package.clone(),
            registry: self.registry()?,
            channels: self.channels(),
            build,
            gate: DeployGate::new(self.release.release_branch.clone()),
            trigger: TriggerContext::new(branch),
            fail_fast: self.release.fail_fast && !no_fail_fast,
        })
    }

    /// Generate the default template for `slipway init`.
    pub fn template(package: &str) -> String {
        format!(
            r#"[release]
package = "{package}"
release-branch = "main"
fail-fast = true

[toolchain]
xtensa-channel = "esp"
riscv-channel = "nightly"

[docs]
site-remote = "origin"
site-branch = "gh-pages"
"#
        )
    }
}
