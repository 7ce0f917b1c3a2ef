//! Target records and toolchain families.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The class of compiler/standard-library build a target's instruction set
/// requires.
///
/// The mapping from family to installation recipe lives in
/// `slipway-toolchain`; this enum only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolchainFamily {
    /// Xtensa cores with the Espressif extended instruction set. Needs the
    /// vendored compiler fork; no upstream channel can build for it.
    Xtensa,
    /// RISC-V rv32imc cores (integer, multiply, compressed).
    RiscvImc,
    /// RISC-V rv32imac cores (adds atomics).
    RiscvImac,
    /// RISC-V rv32imafc cores (adds atomics and single-float).
    RiscvImafc,
}

impl ToolchainFamily {
    /// All known families, in declaration order.
    pub const ALL: [ToolchainFamily; 4] = [
        ToolchainFamily::Xtensa,
        ToolchainFamily::RiscvImc,
        ToolchainFamily::RiscvImac,
        ToolchainFamily::RiscvImafc,
    ];

    /// Stable kebab-case name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            ToolchainFamily::Xtensa => "xtensa",
            ToolchainFamily::RiscvImc => "riscv-imc",
            ToolchainFamily::RiscvImac => "riscv-imac",
            ToolchainFamily::RiscvImafc => "riscv-imafc",
        }
    }

    /// Whether this family needs the vendored (non-upstream) compiler.
    pub fn needs_vendored_toolchain(&self) -> bool {
        matches!(self, ToolchainFamily::Xtensa)
    }
}

impl fmt::Display for ToolchainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One release target: a hardware triple, the toolchain family required to
/// compile for it, and whether it is the primary target.
///
/// Targets are immutable and defined at configuration time. The primary
/// target is the single one whose documentation is publicly deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Target {
    /// The target triple, e.g. `xtensa-esp32-espressif`.
    pub triple: String,
    /// Toolchain family required by this triple's instruction set.
    pub family: ToolchainFamily,
    /// Whether this target's docs are the publicly deployed ones.
    #[serde(default)]
    pub primary: bool,
}

impl Target {
    /// Construct a non-primary target.
    pub fn new(triple: impl Into<String>, family: ToolchainFamily) -> Self {
        Target {
            triple: triple.into(),
            family,
            primary: false,
        }
    }

    /// Construct the primary target.
    pub fn primary(triple: impl Into<String>, family: ToolchainFamily) -> Self {
        Target {
            triple: triple.into(),
            family,
            primary: true,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.triple, self.family)?;
        if self.primary {
            write!(f, " [primary]")?;
        }
        Ok(())
    }
}
