//! Toolchain installer seam and the rustup-backed implementation.

use std::process::Command;

use crate::error::{Result, ToolchainError};
use crate::recipe::InstallRecipe;

/// A fully installed toolchain, bound to one target's pipeline.
///
/// Lifecycle: install → use → discard. Handles are never reused across
/// targets in the same run; each target's pipeline installs its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledToolchain {
    /// The installed channel.
    pub channel: String,
    /// The compilation target this installation serves.
    pub triple: String,
}

impl InstalledToolchain {
    /// The `+channel` override argument understood by the build tool.
    pub fn override_arg(&self) -> String {
        format!("+{}", self.channel)
    }
}

/// Abstract toolchain installer.
///
/// Implementations install the channel described by a recipe and return a
/// handle bound to the requesting target. Tests substitute in-memory fakes.
pub trait ToolchainInstaller {
    /// Install the toolchain for `triple` according to `recipe`.
    fn install(&self, triple: &str, recipe: &InstallRecipe) -> Result<InstalledToolchain>;
}

/// Rustup-backed installer.
///
/// Runs `rustup toolchain install`, then `rustup component add` for each
/// recipe component, then `rustup target add` for the recipe's extra target.
#[derive(Debug, Default)]
pub struct RustupInstaller;

impl RustupInstaller {
    fn rustup(&self, args: &[&str], channel: &str) -> Result<()> {
        let output = Command::new("rustup")
            .args(args)
            .output()
            .map_err(|source| ToolchainError::Spawn {
                tool: "rustup".to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(ToolchainError::InstallFailed {
                channel: channel.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl ToolchainInstaller for RustupInstaller {
    fn install(&self, triple: &str, recipe: &InstallRecipe) -> Result<InstalledToolchain> {
        self.rustup(
            &["toolchain", "install", &recipe.channel],
            &recipe.channel,
        )?;

        for component in &recipe.components {
            self.rustup(
                &[
                    "component",
                    "add",
                    component,
                    "--toolchain",
                    &recipe.channel,
                ],
                &recipe.channel,
            )?;
        }

        if let Some(extra) = &recipe.extra_target {
            self.rustup(
                &["target", "add", extra, "--toolchain", &recipe.channel],
                &recipe.channel,
            )?;
        }

        Ok(InstalledToolchain {
            channel: recipe.channel.clone(),
            triple: triple.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Fake installer that records every install request.
    pub struct RecordingInstaller {
        pub installs: RefCell<Vec<(String, InstallRecipe)>>,
    }

    impl RecordingInstaller {
        pub fn new() -> Self {
            RecordingInstaller {
                installs: RefCell::new(Vec::new()),
            }
        }
    }

    impl ToolchainInstaller for RecordingInstaller {
        fn install(&self, triple: &str, recipe: &InstallRecipe) -> Result<InstalledToolchain> {
            self.installs
                .borrow_mut()
                .push((triple.to_string(), recipe.clone()));
            Ok(InstalledToolchain {
                channel: recipe.channel.clone(),
                triple: triple.to_string(),
            })
        }
    }

    #[test]
    fn override_arg_format() {
        let toolchain = InstalledToolchain {
            channel: "esp".to_string(),
            triple: "xtensa-esp32-espressif".to_string(),
        };
        assert_eq!(toolchain.override_arg(), "+esp");
    }

    #[test]
    fn fake_installer_binds_handle_to_target() {
        let installer = RecordingInstaller::new();
        let recipe = InstallRecipe {
            channel: "nightly".to_string(),
            components: vec!["rust-src".to_string()],
            extra_target: Some("riscv32imc-esp-espressif".to_string()),
        };
        let toolchain = installer
            .install("riscv32imc-esp-espressif", &recipe)
            .unwrap();
        assert_eq!(toolchain.channel, "nightly");
        assert_eq!(toolchain.triple, "riscv32imc-esp-espressif");
        assert_eq!(installer.installs.borrow().len(), 1);
    }

    #[test]
    fn each_install_is_a_fresh_handle() {
        let installer = RecordingInstaller::new();
        let recipe = InstallRecipe {
            channel: "esp".to_string(),
            components: Vec::new(),
            extra_target: None,
        };
        let a = installer.install("xtensa-esp32-espressif", &recipe).unwrap();
        let b = installer
            .install("xtensa-esp32s3-espressif", &recipe)
            .unwrap();
        assert_ne!(a.triple, b.triple);
        assert_eq!(installer.installs.borrow().len(), 2);
    }
}
