//! Toolchain selection and installation.
//!
//! Maps a release target to the toolchain-installation recipe required to
//! compile for it, and drives the installer. The mapping from toolchain
//! family to recipe is static and total over the target registry; a target
//! with an unknown family fails at registry parse time, never as a skip.
//!
//! Each target gets a fresh [`InstalledToolchain`] handle with an
//! install → use → discard lifecycle. Holding the toolchain in a per-target
//! handle (instead of process-global "active toolchain" state) keeps
//! concurrent pipelines possible without shared mutation.

pub mod error;
pub mod installer;
pub mod recipe;

pub use error::{Result, ToolchainError};
pub use installer::{InstalledToolchain, RustupInstaller, ToolchainInstaller};
pub use recipe::{select_recipe, ChannelConfig, InstallRecipe};
