//! Error types for documentation generation and deployment.

/// Errors that can occur while generating or deploying documentation.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// Documentation generation failed for a target.
    #[error("doc generation failed for target '{triple}': {detail}")]
    Generate {
        /// The target whose docs failed to build.
        triple: String,
        /// Generator output.
        detail: String,
    },

    /// Deployment to the public site failed. Fatal, but scoped to the
    /// primary target; completed publishes are not rolled back.
    #[error("doc deployment failed: {detail}")]
    Deploy {
        /// Deployer output or failure description.
        detail: String,
    },

    /// The generated doc tree is missing or malformed.
    #[error("doc tree not found at {path}")]
    MissingTree {
        /// Expected tree location.
        path: std::path::PathBuf,
    },

    /// A deployer tool could not be spawned.
    #[error("failed to invoke '{tool}': {source}")]
    Spawn {
        /// The tool binary name.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for documentation operations.
pub type Result<T> = std::result::Result<T, DocsError>;
