//! Error types for release tagging.

/// Errors that can occur while resolving the release version or writing
/// the tag.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The configured package name matched no package in the metadata
    /// graph. Configuration error: fatal, no tag is attempted.
    #[error("package '{name}' not found in metadata")]
    PackageNotFound {
        /// The configured package name.
        name: String,
    },

    /// The configured package name matched more than one package.
    /// Configuration error: fatal, no tag is attempted.
    #[error("package '{name}' is ambiguous: {count} metadata matches")]
    AmbiguousPackage {
        /// The configured package name.
        name: String,
        /// Number of matches found.
        count: usize,
    },

    /// The tag name already exists. Surfaced, never silently ignored, so an
    /// accidental re-run cannot be masked.
    #[error("tag '{name}' already exists")]
    TagExists {
        /// The conflicting tag name.
        name: String,
    },

    /// The metadata query itself failed.
    #[error("metadata query failed: {detail}")]
    Metadata {
        /// Tool output or failure description.
        detail: String,
    },

    /// Tag creation failed for a reason other than a name conflict.
    #[error("tag creation failed: {detail}")]
    WriteFailed {
        /// Tool output.
        detail: String,
    },

    /// A tool could not be spawned.
    #[error("failed to invoke '{tool}': {source}")]
    Spawn {
        /// The tool binary name.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error in the metadata document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Semver parse error.
    #[error("invalid version: {0}")]
    Semver(#[from] semver::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tagging operations.
pub type Result<T> = std::result::Result<T, TagError>;
