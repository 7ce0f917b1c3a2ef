//! `slipway doctor` — environment diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use crate::commands::run::{REGISTRY_TOKEN_VAR, REPO_TOKEN_VAR};
use crate::manifest::SlipwayManifest;

/// Print diagnostic information for the release environment.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== Slipway Doctor ===");
    println!();

    println!("Slipway version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- System Tools ---");
    print_tool_status("rustup", &["--version"]);
    print_tool_status("cargo", &["--version"]);
    print_tool_status("git", &["--version"]);
    println!();

    println!("--- Credentials ---");
    print_env_status(REGISTRY_TOKEN_VAR);
    print_env_status(REPO_TOKEN_VAR);
    println!();

    println!("--- Project Status ---");
    match SlipwayManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  slipway.toml: found at {}", dir.display());
            println!("  Package:      {}", manifest.release.package);
            println!("  Release branch: {}", manifest.release.release_branch);
            match manifest.registry() {
                Ok(registry) => {
                    println!("  Targets:      {}", registry.len());
                    println!("  Primary:      {}", registry.primary().triple);
                }
                Err(e) => println!("  Targets:      invalid — {e}"),
            }
        }
        Ok(None) => {
            println!("  slipway.toml: not found (run `slipway init <package>`)");
        }
        Err(e) => {
            println!("  slipway.toml: error — {e}");
        }
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

/// Report presence only; the value never reaches the terminal.
fn print_env_status(var: &str) {
    let set = std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false);
    println!("  {var}: {}", if set { "set" } else { "not set" });
}

#[cfg(test)]
mod tests {
    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        super::run(dir.path()).unwrap();
    }
}
