//! Error types for the build & publish driver.

/// Errors that can occur while building or publishing one target.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Registry authentication failed. Fatal for the whole run: the
    /// credential is shared, so no further targets are attempted.
    #[error("registry authentication failed: {detail}")]
    Auth {
        /// Registry/client output.
        detail: String,
    },

    /// Compilation failed for a target.
    #[error("compile failed for target '{triple}': {detail}")]
    Compile {
        /// The target that failed to build.
        triple: String,
        /// Compiler output.
        detail: String,
    },

    /// The registry rejected the submission (e.g. version already
    /// published). Surfaced verbatim.
    #[error("registry rejected publish: {detail}")]
    Rejected {
        /// Registry output, verbatim.
        detail: String,
    },

    /// The published version could not be determined from the package
    /// manifest.
    #[error("cannot resolve package version: {detail}")]
    Version {
        /// Description of the lookup failure.
        detail: String,
    },

    /// SDK configuration file could not be read or parsed.
    #[error("invalid SDK config at {path}: {detail}")]
    SdkConfig {
        /// Path of the offending file.
        path: std::path::PathBuf,
        /// Parse/read failure description.
        detail: String,
    },

    /// A driver tool could not be spawned.
    #[error("failed to invoke '{tool}': {source}")]
    Spawn {
        /// The tool binary name.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Semver parse error.
    #[error("invalid version: {0}")]
    Semver(#[from] semver::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for build/publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
