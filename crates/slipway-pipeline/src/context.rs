//! Per-target pipeline context.

use std::path::{Path, PathBuf};

use slipway_targets::Target;
use slipway_toolchain::InstalledToolchain;

/// Everything one target's pipeline holds while it runs.
///
/// The toolchain lives in this per-pipeline value instead of process-global
/// "active toolchain" state: each target installs its own, and discarding
/// the context discards the handle. This keeps pipelines isolated, so
/// running them concurrently needs no shared mutation.
#[derive(Debug, Clone)]
pub struct TargetContext {
    /// The target this pipeline serves.
    pub target: Target,
    /// The toolchain installed for this target.
    pub toolchain: InstalledToolchain,
    /// Scratch directory for this target's intermediate output (doc trees
    /// and the like). Removed with the context.
    pub workdir: PathBuf,
}

impl TargetContext {
    /// Root for this target's generated documentation.
    pub fn doc_root(&self) -> PathBuf {
        self.workdir.join("doc")
    }

    /// Scratch directory for one target under the run's scratch root.
    pub fn workdir_for(scratch_root: &Path, target: &Target) -> PathBuf {
        scratch_root.join(&target.triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slipway_targets::ToolchainFamily;

    #[test]
    fn workdirs_are_per_target() {
        let root = Path::new("/tmp/slipway-run");
        let a = Target::primary("xtensa-esp32-espressif", ToolchainFamily::Xtensa);
        let b = Target::new("riscv32imc-esp-espressif", ToolchainFamily::RiscvImc);
        assert_ne!(
            TargetContext::workdir_for(root, &a),
            TargetContext::workdir_for(root, &b)
        );
    }

    #[test]
    fn doc_root_is_under_workdir() {
        let ctx = TargetContext {
            target: Target::primary("xtensa-esp32-espressif", ToolchainFamily::Xtensa),
            toolchain: InstalledToolchain {
                channel: "esp".to_string(),
                triple: "xtensa-esp32-espressif".to_string(),
            },
            workdir: PathBuf::from("/tmp/run/xtensa-esp32-espressif"),
        };
        assert!(ctx.doc_root().starts_with(&ctx.workdir));
    }
}
