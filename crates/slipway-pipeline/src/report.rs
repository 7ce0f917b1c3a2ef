//! Run report.

use std::fmt;

use slipway_tag::ReleaseTag;

/// Outcome of one target's pipeline.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    /// The target triple.
    pub triple: String,
    /// The version the publish step reported.
    pub version: semver::Version,
    /// Whether this target's docs were publicly deployed.
    pub docs_deployed: bool,
}

/// Report of a completed (successful) release run.
///
/// The run itself is binary success/failure; the report exists to show the
/// operator what happened per target.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Per-target outcomes, in run order.
    pub outcomes: Vec<TargetOutcome>,
    /// The tag recorded for the release.
    pub tag: ReleaseTag,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Release {} complete", self.tag.version)?;
        for outcome in &self.outcomes {
            writeln!(
                f,
                "  {} published{}",
                outcome.triple,
                if outcome.docs_deployed {
                    ", docs deployed"
                } else {
                    ""
                }
            )?;
        }
        writeln!(f, "Tagged: {}", self.tag.name)
    }
}
