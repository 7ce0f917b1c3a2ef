//! Documentation driver.
//!
//! Documentation is generated for every target as a side effect of the
//! build context, but deployed only when the deploy gate passes: the target
//! is the primary one AND the run was triggered from the release branch.
//! All other targets' doc trees are discarded with their scratch
//! directories.
//!
//! Deployment replaces the entire public documentation tree; prior contents
//! are not merged.

pub mod deploy;
pub mod error;
pub mod gate;
pub mod generate;

pub use deploy::{DocDeployer, GitWorktreeDeployer, SiteDirDeployer};
pub use error::{DocsError, Result};
pub use gate::{DeployGate, TriggerContext};
pub use generate::{deploy_if_gated, write_redirect_index, CargoDocGenerator, DocGenerator};
