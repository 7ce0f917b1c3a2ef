//! Documentation deployer seam and implementations.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DocsError, Result};

/// Abstract documentation deployer.
///
/// Implementations publish a directory tree wholesale to the public site
/// root, replacing prior contents (full replacement, no incremental diff).
pub trait DocDeployer {
    /// Publish `tree` as the new site contents.
    fn deploy(&self, tree: &Path) -> Result<()>;
}

/// Filesystem deployer: replaces the contents of a site root directory.
///
/// Used for local/hosted-volume sites and as the reference implementation
/// of full-replacement semantics. Re-deploying an identical tree is a
/// content-level no-op (the bytes end up the same), though the mechanism
/// still rewrites.
#[derive(Debug, Clone)]
pub struct SiteDirDeployer {
    root: PathBuf,
}

impl SiteDirDeployer {
    /// Deployer writing to `root`.
    pub fn new(root: PathBuf) -> Self {
        SiteDirDeployer { root }
    }

    /// The site root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocDeployer for SiteDirDeployer {
    fn deploy(&self, tree: &Path) -> Result<()> {
        if !tree.is_dir() {
            return Err(DocsError::MissingTree {
                path: tree.to_path_buf(),
            });
        }
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root)?;
        }
        copy_tree(tree, &self.root)?;
        Ok(())
    }
}

/// Git-backed deployer: publishes the tree as a fresh single-commit branch,
/// force-pushed over the site branch (orphan semantics — prior history is
/// replaced, not merged).
#[derive(Debug, Clone)]
pub struct GitWorktreeDeployer {
    /// Remote URL, with any write token already embedded by the caller.
    pub remote: String,
    /// Site branch name (e.g. `gh-pages`).
    pub branch: String,
}

impl GitWorktreeDeployer {
    /// Deployer pushing `branch` to `remote`.
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        GitWorktreeDeployer {
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    fn git(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .map_err(|source| DocsError::Spawn {
                tool: "git".to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(DocsError::Deploy {
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl DocDeployer for GitWorktreeDeployer {
    fn deploy(&self, tree: &Path) -> Result<()> {
        if !tree.is_dir() {
            return Err(DocsError::MissingTree {
                path: tree.to_path_buf(),
            });
        }
        // Single-commit branch built in place inside the doc tree.
        self.git(tree, &["init", "--initial-branch", &self.branch])?;
        self.git(tree, &["add", "-A"])?;
        self.git(
            tree,
            &[
                "-c",
                "user.name=slipway",
                "-c",
                "user.email=slipway@localhost",
                "commit",
                "-m",
                "deploy documentation",
            ],
        )?;
        self.git(
            tree,
            &["push", "--force", &self.remote, &format!("HEAD:{}", self.branch)],
        )?;
        Ok(())
    }
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
