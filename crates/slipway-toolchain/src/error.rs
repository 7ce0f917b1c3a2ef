//! Error types for toolchain selection and installation.

/// Errors that can occur while installing a toolchain.
///
/// Recipe selection itself cannot fail: it is total over the toolchain
/// families, and a target with an unknown family never parses into the
/// registry in the first place.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The installer tool reported failure.
    #[error("toolchain install failed for channel '{channel}': {detail}")]
    InstallFailed {
        /// The channel that failed to install.
        channel: String,
        /// Installer output or failure description.
        detail: String,
    },

    /// The installer tool itself could not be spawned.
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

/// Result type for toolchain operations.
pub type Result<T> = std::result::Result<T, ToolchainError>;
