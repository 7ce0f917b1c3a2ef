//! Pipeline error aggregation and classification.

use slipway_docs::DocsError;
use slipway_publish::PublishError;
use slipway_tag::TagError;
use slipway_targets::TargetError;
use slipway_toolchain::ToolchainError;

/// Failure classes of a release run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration: invalid registry, missing credential, ambiguous
    /// package lookup. Never retried.
    Configuration,
    /// The shared registry credential was rejected.
    Authentication,
    /// A target failed to compile.
    Compile,
    /// The registry rejected a publish.
    Publish,
    /// Public doc deployment failed.
    Deployment,
    /// The release tag name already exists.
    TagConflict,
    /// Anything else (tool spawn failures, I/O).
    Tool,
}

/// Errors terminating a release run.
///
/// All failures propagate to the top level; the run is binary
/// success/failure.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Target registry / configuration error.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Toolchain selection or installation error.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// Build or publish error.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Documentation error.
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// Tagging error.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// Two targets published different versions in one run. The version
    /// originates from a single manifest, so this means the workspace
    /// changed mid-run.
    #[error(
        "version drift: target '{triple}' published {found}, expected {expected}"
    )]
    VersionDrift {
        /// The target that disagreed.
        triple: String,
        /// Version published by earlier targets.
        expected: semver::Version,
        /// Version this target published.
        found: semver::Version,
    },

    /// One or more target pipelines failed (fail-fast disabled). The run
    /// as a whole is a failure and no tag was created.
    #[error("{} target(s) failed: {}", failures.len(), failures.join(", "))]
    TargetsFailed {
        /// Triples of the failed targets.
        failures: Vec<String>,
    },

    /// No registry credential available.
    #[error("registry token not set (expected in {var})")]
    MissingToken {
        /// The environment variable that was consulted.
        var: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Classify this error per the run-failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Target(_) => ErrorKind::Configuration,
            PipelineError::Toolchain(_) => ErrorKind::Tool,
            PipelineError::Publish(PublishError::Auth { .. }) => ErrorKind::Authentication,
            PipelineError::Publish(PublishError::Compile { .. }) => ErrorKind::Compile,
            PipelineError::Publish(_) => ErrorKind::Publish,
            PipelineError::Docs(DocsError::Deploy { .. }) => ErrorKind::Deployment,
            PipelineError::Docs(_) => ErrorKind::Tool,
            PipelineError::Tag(TagError::TagExists { .. }) => ErrorKind::TagConflict,
            PipelineError::Tag(TagError::PackageNotFound { .. })
            | PipelineError::Tag(TagError::AmbiguousPackage { .. }) => ErrorKind::Configuration,
            PipelineError::Tag(_) => ErrorKind::Tool,
            PipelineError::VersionDrift { .. } => ErrorKind::Publish,
            PipelineError::TargetsFailed { .. } => ErrorKind::Publish,
            PipelineError::MissingToken { .. } => ErrorKind::Configuration,
            PipelineError::Io(_) => ErrorKind::Tool,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_class_covers_registry_and_metadata() {
        let e: PipelineError = TargetError::EmptyRegistry.into();
        assert_eq!(e.kind(), ErrorKind::Configuration);

        let e: PipelineError = TagError::AmbiguousPackage {
            name: "esp-hal".into(),
            count: 2,
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::Configuration);

        let e = PipelineError::MissingToken {
            var: "SLIPWAY_REGISTRY_TOKEN".into(),
        };
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn install_failure_is_a_tool_error() {
        let e: PipelineError = ToolchainError::InstallFailed {
            channel: "esp".into(),
            detail: "download failed".into(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::Tool);
    }

    #[test]
    fn auth_compile_publish_are_distinct_classes() {
        let auth: PipelineError = PublishError::Auth {
            detail: "401".into(),
        }
        .into();
        assert_eq!(auth.kind(), ErrorKind::Authentication);

        let compile: PipelineError = PublishError::Compile {
            triple: "t".into(),
            detail: "".into(),
        }
        .into();
        assert_eq!(compile.kind(), ErrorKind::Compile);

        let rejected: PipelineError = PublishError::Rejected {
            detail: "crate version 3.1.0 is already uploaded".into(),
        }
        .into();
        assert_eq!(rejected.kind(), ErrorKind::Publish);
    }

    #[test]
    fn tag_conflict_class() {
        let e: PipelineError = TagError::TagExists {
            name: "v3.1.0".into(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::TagConflict);
    }

    #[test]
    fn deployment_class() {
        let e: PipelineError = DocsError::Deploy {
            detail: "push rejected".into(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::Deployment);
    }
}
