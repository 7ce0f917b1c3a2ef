//! `slipway init` — write a starter manifest.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::SlipwayManifest;

/// Create a `slipway.toml` for `package` in the current directory.
pub fn run(package: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    create_manifest(&cwd, package)?;
    println!("Created slipway.toml for '{package}'");
    println!("Next: review [[targets]] (defaults to the built-in matrix) and run `slipway plan`.");
    Ok(())
}

/// Write the manifest template into `dir`.
pub fn create_manifest(dir: &Path, package: &str) -> Result<()> {
    let path = dir.join("slipway.toml");
    if path.exists() {
        bail!("slipway.toml already exists at {}", path.display());
    }
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, SlipwayManifest::template(package))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parseable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        create_manifest(dir.path(), "esp-hal").unwrap();

        let (manifest, _) = SlipwayManifest::find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.release.package, "esp-hal");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        create_manifest(dir.path(), "esp-hal").unwrap();
        assert!(create_manifest(dir.path(), "other").is_err());
    }
}
