//! Release tagging.
//!
//! After all target pipelines complete, the tagger runs exactly once: it
//! extracts the published package's version from build metadata, formats
//! the deterministic tag name `v<version>`, and writes an annotated tag
//! recording the release. A duplicate tag is an error, not a no-op — it is
//! surfaced to keep an accidental re-run visible.

pub mod error;
pub mod metadata;
pub mod tag;

pub use error::{Result, TagError};
pub use metadata::{CargoMetadataSource, MetadataSource};
pub use tag::{cut_release, tag_name, GitTagWriter, ReleaseTag, TagWriter};
