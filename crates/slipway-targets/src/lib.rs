//! Release target registry for the Slipway release orchestrator.
//!
//! A release run iterates over an ordered set of [`Target`]s, each a hardware
//! triple tagged with the [`ToolchainFamily`] required to compile for it.
//! Exactly one target is flagged *primary*: the one whose generated
//! documentation is publicly deployed.

pub mod error;
pub mod registry;
pub mod target;

pub use error::{Result, TargetError};
pub use registry::TargetRegistry;
pub use target::{Target, ToolchainFamily};
