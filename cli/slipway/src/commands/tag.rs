//! `slipway tag` — run the release tagger alone.

use std::path::Path;

use anyhow::Result;

use slipway_tag::{cut_release, tag_name, CargoMetadataSource, GitTagWriter, MetadataSource};

/// Resolve the version and create (or preview) the release tag.
pub fn run(project_dir: &Path, package: &str, dry_run: bool) -> Result<()> {
    let metadata = CargoMetadataSource::new(project_dir.to_path_buf());

    if dry_run {
        let version = metadata.package_version(package)?;
        println!("Would create tag {} for {package} {version}", tag_name(&version));
        return Ok(());
    }

    let writer = GitTagWriter {
        workdir: Some(project_dir.to_path_buf()),
        push_remote: Some("origin".to_string()),
    };
    let tag = cut_release(&metadata, &writer, package)?;
    println!("Tagged: {} ({})", tag.name, tag.message);
    Ok(())
}
