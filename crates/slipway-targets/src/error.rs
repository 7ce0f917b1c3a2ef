//! Error types for target registry operations.

/// Errors that can occur while building or querying the target registry.
///
/// All of these are configuration errors: they are fatal and never retried.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The registry contains no targets.
    #[error("target registry is empty")]
    EmptyRegistry,

    /// No target is flagged as primary.
    #[error("no target is flagged primary (exactly one required)")]
    NoPrimary,

    /// More than one target is flagged as primary.
    #[error("multiple targets flagged primary: {}", triples.join(", "))]
    MultiplePrimary {
        /// The offending triples.
        triples: Vec<String>,
    },

    /// A triple was requested that is not in the registry.
    #[error("unknown target: '{triple}'")]
    UnknownTarget {
        /// The requested triple.
        triple: String,
    },

    /// Duplicate triple in the registry definition.
    #[error("duplicate target: '{triple}'")]
    DuplicateTarget {
        /// The duplicated triple.
        triple: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a registry definition.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
