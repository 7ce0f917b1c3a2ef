//! Per-target documentation generation.

use std::path::{Path, PathBuf};
use std::process::Command;

use slipway_targets::Target;
use slipway_toolchain::InstalledToolchain;

use crate::deploy::DocDeployer;
use crate::error::{DocsError, Result};
use crate::gate::{DeployGate, TriggerContext};

/// Abstract documentation generator.
pub trait DocGenerator {
    /// Generate docs for `package` on `target`, rooted under `out_root`.
    /// Returns the directory holding the generated tree.
    fn generate(
        &self,
        toolchain: &InstalledToolchain,
        target: &Target,
        package: &str,
        out_root: &Path,
    ) -> Result<PathBuf>;
}

/// Cargo-backed generator: `cargo +<channel> doc -p <package> --target
/// <triple> --no-deps`, followed by redirect-index synthesis.
#[derive(Debug, Clone, Default)]
pub struct CargoDocGenerator {
    /// Working directory for cargo invocations (package root).
    pub workdir: Option<PathBuf>,
}

impl DocGenerator for CargoDocGenerator {
    fn generate(
        &self,
        toolchain: &InstalledToolchain,
        target: &Target,
        package: &str,
        out_root: &Path,
    ) -> Result<PathBuf> {
        let mut cmd = Command::new("cargo");
        cmd.arg(toolchain.override_arg()).args([
            "doc",
            "-p",
            package,
            "--target",
            &target.triple,
            "--no-deps",
        ]);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd.env("CARGO_TARGET_DIR", out_root);

        let output = cmd.output().map_err(|source| DocsError::Spawn {
            tool: "cargo".to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(DocsError::Generate {
                triple: target.triple.clone(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let tree = out_root.join(&target.triple).join("doc");
        write_redirect_index(&tree, package)?;
        Ok(tree)
    }
}

/// Synthesize an `index.html` redirecting to the package's top-level
/// documentation entry point.
pub fn write_redirect_index(tree: &Path, package: &str) -> Result<()> {
    std::fs::create_dir_all(tree)?;
    let entry = package.replace('-', "_");
    let html = format!(
        "<!DOCTYPE html>\n<html><head>\
         <meta http-equiv=\"refresh\" content=\"0; url={entry}/index.html\">\
         </head><body>\
         <a href=\"{entry}/index.html\">{package} documentation</a>\
         </body></html>\n"
    );
    std::fs::write(tree.join("index.html"), html)?;
    Ok(())
}

/// Deploy `tree` iff the gate passes for (target, ctx).
///
/// Returns whether a deployment happened. Non-deployed trees are left in
/// place for the caller to discard with the target's scratch directory.
pub fn deploy_if_gated(
    gate: &DeployGate,
    target: &Target,
    ctx: &TriggerContext,
    tree: &Path,
    deployer: &dyn DocDeployer,
) -> Result<bool> {
    if !gate.should_deploy(target, ctx) {
        return Ok(false);
    }
    deployer.deploy(tree)?;
    Ok(true)
}
