//! The deployment gate predicate.
//!
//! Modeled as an explicit predicate over (target, trigger context) rather
//! than inline conditionals, so the gating rule is independently testable.

use slipway_targets::Target;

/// Which ref triggered the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    /// The branch name the run is executing against.
    pub branch: String,
}

impl TriggerContext {
    /// Context for a run triggered from `branch`.
    pub fn new(branch: impl Into<String>) -> Self {
        TriggerContext {
            branch: branch.into(),
        }
    }
}

/// Gate deciding whether a target's generated documentation is deployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployGate {
    /// The designated release branch. Only runs against this ref may
    /// perform public deployment.
    pub release_branch: String,
}

impl DeployGate {
    /// Gate for the given release branch.
    pub fn new(release_branch: impl Into<String>) -> Self {
        DeployGate {
            release_branch: release_branch.into(),
        }
    }

    /// Deploy iff the target is primary AND the triggering ref is the
    /// release branch.
    pub fn should_deploy(&self, target: &Target, ctx: &TriggerContext) -> bool {
        target.primary && ctx.branch == self.release_branch
    }
}
