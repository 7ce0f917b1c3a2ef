//! Release run orchestration.
//!
//! Drives the full release sequence over the target registry: per target,
//! toolchain selection and install, build, publish, doc generation, and the
//! gated doc deployment; then, strictly after every target pipeline has
//! completed, the release tagger runs exactly once.
//!
//! Abort-on-first-failure across targets is a policy, not an accident: it
//! is carried as the explicit [`PipelineConfig::fail_fast`] flag
//! (default on). A partially published release is never tagged either way.

pub mod config;
pub mod context;
pub mod error;
pub mod report;
pub mod run;

pub use config::{Collaborators, PipelineConfig};
pub use context::TargetContext;
pub use error::{ErrorKind, PipelineError, Result};
pub use report::{RunReport, TargetOutcome};
pub use run::run;
