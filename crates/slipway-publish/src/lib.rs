//! Build & publish driver.
//!
//! For one target: compile the package against the target's installed
//! toolchain (with the target's SDK environment overrides and the
//! target-invariant std-rebuild flags), producing an ephemeral
//! [`BuildArtifact`], then submit it to the package registry bound to the
//! shared credential.
//!
//! Publish is attempted at most once per target per run. There is no
//! cross-target transaction: a failure for one target does not roll back
//! prior targets' publishes.

pub mod config;
pub mod driver;
pub mod error;

pub use config::{BuildConfig, RegistryToken, SdkConfig};
pub use driver::{BuildArtifact, BuildRunner, CargoDriver, PublishOutcome, RegistryPublisher};
pub use error::{PublishError, Result};
