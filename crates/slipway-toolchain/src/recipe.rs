//! Family-to-recipe mapping.
//!
//! A recipe is everything the installer needs for one target: which channel
//! to install, which components to add, and which extra compilation target
//! to register with the channel.

use serde::{Deserialize, Serialize};

use slipway_targets::{Target, ToolchainFamily};

/// Toolchain channel identifiers, supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChannelConfig {
    /// Channel carrying the vendored Xtensa compiler (e.g. `esp`).
    pub xtensa_channel: String,
    /// Upstream channel used for the RISC-V variants (e.g. `nightly`).
    pub riscv_channel: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            xtensa_channel: "esp".to_string(),
            riscv_channel: "nightly".to_string(),
        }
    }
}

/// The installation recipe for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecipe {
    /// Channel to install.
    pub channel: String,
    /// Components to add after install (e.g. `rust-src` for std rebuilds).
    pub components: Vec<String>,
    /// Compilation target to register with the channel, if the channel does
    /// not ship it by default. The vendored Xtensa channel ships its own
    /// targets; the upstream channel needs each RISC-V triple added.
    pub extra_target: Option<String>,
}

/// Select the installation recipe for a target.
///
/// Total over [`ToolchainFamily`]: every target that parsed into the
/// registry resolves to exactly one recipe. (Unknown *configured* triples
/// fail earlier, at registry/family parse time.)
pub fn select_recipe(target: &Target, channels: &ChannelConfig) -> InstallRecipe {
    match target.family {
        ToolchainFamily::Xtensa => InstallRecipe {
            channel: channels.xtensa_channel.clone(),
            components: Vec::new(),
            extra_target: None,
        },
        ToolchainFamily::RiscvImc | ToolchainFamily::RiscvImac | ToolchainFamily::RiscvImafc => {
            InstallRecipe {
                channel: channels.riscv_channel.clone(),
                components: vec!["rust-src".to_string()],
                extra_target: Some(target.triple.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slipway_targets::TargetRegistry;

    #[test]
    fn xtensa_targets_use_vendored_channel() {
        let channels = ChannelConfig::default();
        let target = Target::primary("xtensa-esp32-espressif", ToolchainFamily::Xtensa);
        let recipe = select_recipe(&target, &channels);
        assert_eq!(recipe.channel, "esp");
        assert!(recipe.components.is_empty());
        assert!(recipe.extra_target.is_none());
    }

    #[test]
    fn riscv_targets_use_upstream_channel_with_rust_src() {
        let channels = ChannelConfig::default();
        for family in [
            ToolchainFamily::RiscvImc,
            ToolchainFamily::RiscvImac,
            ToolchainFamily::RiscvImafc,
        ] {
            let target = Target::new(format!("riscv32-{family}-test"), family);
            let recipe = select_recipe(&target, &channels);
            assert_eq!(recipe.channel, "nightly");
            assert_eq!(recipe.components, vec!["rust-src".to_string()]);
            assert_eq!(recipe.extra_target.as_deref(), Some(target.triple.as_str()));
        }
    }

    #[test]
    fn every_builtin_target_resolves_to_a_recipe() {
        let channels = ChannelConfig::default();
        for target in TargetRegistry::builtin().iter() {
            let recipe = select_recipe(target, &channels);
            assert!(!recipe.channel.is_empty());
        }
    }

    #[test]
    fn configured_channels_are_respected() {
        let channels = ChannelConfig {
            xtensa_channel: "esp-1.88".to_string(),
            riscv_channel: "nightly-2026-08-01".to_string(),
        };
        let xtensa = Target::primary("xtensa-esp32-espressif", ToolchainFamily::Xtensa);
        assert_eq!(select_recipe(&xtensa, &channels).channel, "esp-1.88");

        let riscv = Target::new("riscv32imc-esp-espressif", ToolchainFamily::RiscvImc);
        assert_eq!(select_recipe(&riscv, &channels).channel, "nightly-2026-08-01");
    }
}
