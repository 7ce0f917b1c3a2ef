//! Ordered target registry with configuration-time validation.

use serde::Deserialize;

use crate::error::{Result, TargetError};
use crate::target::{Target, ToolchainFamily};

/// An ordered sequence of release targets.
///
/// Order determines toolchain-setup/build iteration order but has no
/// correctness impact; targets are independent. Validation happens at
/// construction: the registry must be non-empty and contain exactly one
/// primary target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RegistryDoc {
    #[serde(default)]
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Build a registry from an ordered target list, validating it.
    pub fn new(targets: Vec<Target>) -> Result<Self> {
        if targets.is_empty() {
            return Err(TargetError::EmptyRegistry);
        }

        for (i, target) in targets.iter().enumerate() {
            if targets[..i].iter().any(|t| t.triple == target.triple) {
                return Err(TargetError::DuplicateTarget {
                    triple: target.triple.clone(),
                });
            }
        }

        let primaries: Vec<&Target> = targets.iter().filter(|t| t.primary).collect();
        match primaries.len() {
            0 => return Err(TargetError::NoPrimary),
            1 => {}
            _ => {
                return Err(TargetError::MultiplePrimary {
                    triples: primaries.iter().map(|t| t.triple.clone()).collect(),
                })
            }
        }

        Ok(TargetRegistry { targets })
    }

    /// The built-in Espressif release matrix: three Xtensa chips and three
    /// RISC-V variants, with the original ESP32 as the primary target.
    pub fn builtin() -> Self {
        TargetRegistry::new(vec![
            Target::primary("xtensa-esp32-espressif", ToolchainFamily::Xtensa),
            Target::new("xtensa-esp32s2-espressif", ToolchainFamily::Xtensa),
            Target::new("xtensa-esp32s3-espressif", ToolchainFamily::Xtensa),
            Target::new("riscv32imc-esp-espressif", ToolchainFamily::RiscvImc),
            Target::new("riscv32imac-esp-espressif", ToolchainFamily::RiscvImac),
            Target::new("riscv32imafc-esp-espressif", ToolchainFamily::RiscvImafc),
        ])
        .expect("builtin registry is valid")
    }

    /// Parse a registry from a TOML document with a `[[targets]]` array.
    pub fn from_toml(s: &str) -> Result<Self> {
        let doc: RegistryDoc = toml::from_str(s)?;
        TargetRegistry::new(doc.targets)
    }

    /// Iterate targets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the registry is empty. Always false for a validated registry;
    /// kept for the clippy `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The unique primary target.
    pub fn primary(&self) -> &Target {
        self.targets
            .iter()
            .find(|t| t.primary)
            .expect("validated registry has a primary target")
    }

    /// Look up a target by triple.
    pub fn get(&self, triple: &str) -> Result<&Target> {
        self.targets
            .iter()
            .find(|t| t.triple == triple)
            .ok_or_else(|| TargetError::UnknownTarget {
                triple: triple.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_valid() {
        let registry = TargetRegistry::builtin();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.primary().triple, "xtensa-esp32-espressif");
    }

    #[test]
    fn empty_registry_rejected() {
        let result = TargetRegistry::new(Vec::new());
        assert!(matches!(result, Err(TargetError::EmptyRegistry)));
    }

    #[test]
    fn no_primary_rejected() {
        let result = TargetRegistry::new(vec![
            Target::new("a", ToolchainFamily::Xtensa),
            Target::new("b", ToolchainFamily::RiscvImc),
        ]);
        assert!(matches!(result, Err(TargetError::NoPrimary)));
    }

    #[test]
    fn multiple_primary_rejected() {
        let result = TargetRegistry::new(vec![
            Target::primary("a", ToolchainFamily::Xtensa),
            Target::primary("b", ToolchainFamily::RiscvImc),
        ]);
        match result {
            Err(TargetError::MultiplePrimary { triples }) => {
                assert_eq!(triples, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("expected MultiplePrimary, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_triple_rejected() {
        let result = TargetRegistry::new(vec![
            Target::primary("a", ToolchainFamily::Xtensa),
            Target::new("a", ToolchainFamily::Xtensa),
        ]);
        assert!(matches!(
            result,
            Err(TargetError::DuplicateTarget { triple }) if triple == "a"
        ));
    }

    #[test]
    fn iteration_preserves_declaration_order() {
        let registry = TargetRegistry::new(vec![
            Target::new("z-last-alphabetically-first", ToolchainFamily::RiscvImc),
            Target::primary("a-first-alphabetically-last", ToolchainFamily::Xtensa),
        ])
        .unwrap();
        let triples: Vec<&str> = registry.iter().map(|t| t.triple.as_str()).collect();
        assert_eq!(
            triples,
            vec!["z-last-alphabetically-first", "a-first-alphabetically-last"]
        );
    }

    #[test]
    fn lookup_by_triple() {
        let registry = TargetRegistry::builtin();
        let target = registry.get("riscv32imac-esp-espressif").unwrap();
        assert_eq!(target.family, ToolchainFamily::RiscvImac);

        let missing = registry.get("nonexistent");
        assert!(matches!(
            missing,
            Err(TargetError::UnknownTarget { triple }) if triple == "nonexistent"
        ));
    }

    #[test]
    fn parse_registry_from_toml() {
        let registry = TargetRegistry::from_toml(
            r#"
[[targets]]
triple = "xtensa-esp32-espressif"
family = "xtensa"
primary = true

[[targets]]
triple = "riscv32imc-esp-espressif"
family = "riscv-imc"
"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.primary().triple, "xtensa-esp32-espressif");
    }

    #[test]
    fn parse_registry_without_targets_is_empty_error() {
        let result = TargetRegistry::from_toml("");
        assert!(matches!(result, Err(TargetError::EmptyRegistry)));
    }
}
