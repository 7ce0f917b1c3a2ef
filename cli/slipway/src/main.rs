//! Slipway CLI — cross-target release orchestration.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use manifest::SlipwayManifest;

#[derive(Parser)]
#[command(name = "slipway", version, about = "Cross-target release orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a slipway.toml for a package
    Init {
        /// Package name under release
        package: String,
    },
    /// Execute the full release: toolchains, builds, publishes, docs, tag
    Run {
        /// Branch the run executes against (default: current git branch)
        #[arg(long)]
        branch: Option<String>,
        /// Continue past failed targets (a partial release is still never tagged)
        #[arg(long)]
        no_fail_fast: bool,
        /// Print the plan instead of executing
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the per-target release plan without side effects
    Plan {
        /// Branch to plan against (default: current git branch)
        #[arg(long)]
        branch: Option<String>,
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect the release target matrix
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Run the release tagger alone
    Tag {
        /// Resolve and print the tag without creating it
        #[arg(long)]
        dry_run: bool,
    },
    /// Check tools, credentials, and project status
    Doctor,
}

#[derive(Subcommand)]
enum TargetAction {
    /// List targets in run order
    List,
    /// Show one target's details and toolchain recipe
    Describe {
        /// Target triple
        triple: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { package } => commands::init::run(&package),

        Commands::Run {
            branch,
            no_fail_fast,
            dry_run,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::run::run(
                &project_dir,
                &manifest,
                branch.as_deref(),
                no_fail_fast,
                dry_run,
            )
        }

        Commands::Plan { branch, json } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            let branch = match branch {
                Some(b) => b,
                None => manifest.release.release_branch.clone(),
            };
            let config = manifest.pipeline_config(&project_dir, &branch, false)?;
            commands::plan::run(&config, json)
        }

        Commands::Target { action } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            let (registry, channels) = match &manifest {
                Some(m) => (m.registry()?, m.channels()),
                None => (
                    slipway_targets::TargetRegistry::builtin(),
                    slipway_toolchain::ChannelConfig::default(),
                ),
            };
            match action {
                TargetAction::List => commands::target::list(&registry),
                TargetAction::Describe { triple } => {
                    commands::target::describe(&registry, &channels, &triple)
                }
            }
        }

        Commands::Tag { dry_run } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::tag::run(&project_dir, &manifest.release.package, dry_run)
        }

        Commands::Doctor => commands::doctor::run(&cwd),
    }
}

/// Load manifest, returning error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(SlipwayManifest, PathBuf)> {
    match SlipwayManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no slipway.toml found (run `slipway init <package>` first)"),
    }
}

/// Try to load a manifest from the current directory upward.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<SlipwayManifest>, Option<PathBuf>)> {
    match SlipwayManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Init → load → plan workflow, no external tools touched.
    #[test]
    fn init_and_plan_workflow() {
        let dir = tempfile::tempdir().unwrap();
        commands::init::create_manifest(dir.path(), "esp-hal").unwrap();

        let (manifest, project_dir) = SlipwayManifest::find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(project_dir, dir.path());

        // Plan against the release branch: exactly one deploying target.
        let config = manifest.pipeline_config(&project_dir, "main", false).unwrap();
        let plan = commands::plan::build_plan(&config);
        assert_eq!(plan.targets.len(), 6);
        assert_eq!(plan.targets.iter().filter(|t| t.deploys_docs).count(), 1);

        // Plan off the release branch: none.
        let config = manifest
            .pipeline_config(&project_dir, "feature/wip", false)
            .unwrap();
        let plan = commands::plan::build_plan(&config);
        assert_eq!(plan.targets.iter().filter(|t| t.deploys_docs).count(), 0);

        commands::plan::run(&config, false).unwrap();
        commands::plan::run(&config, true).unwrap();
    }

    /// Manifest-defined targets drive plan and target listing.
    #[test]
    fn manifest_targets_flow_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("slipway.toml"),
            r#"
[release]
package = "esp-hal"
release-branch = "master"

[[targets]]
triple = "xtensa-esp32s3-espressif"
family = "xtensa"
primary = true

[[targets]]
triple = "riscv32imac-esp-espressif"
family = "riscv-imac"
"#,
        )
        .unwrap();

        let (manifest, project_dir) = SlipwayManifest::find_and_load(dir.path()).unwrap().unwrap();
        let registry = manifest.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.primary().triple, "xtensa-esp32s3-espressif");

        commands::target::list(&registry).unwrap();
        commands::target::describe(&registry, &manifest.channels(), "riscv32imac-esp-espressif")
            .unwrap();

        let config = manifest
            .pipeline_config(&project_dir, "master", false)
            .unwrap();
        let plan = commands::plan::build_plan(&config);
        assert!(plan
            .targets
            .iter()
            .any(|t| t.triple == "xtensa-esp32s3-espressif" && t.deploys_docs));
    }

    /// A manifest with invalid targets fails at registry construction.
    #[test]
    fn invalid_manifest_targets_surface_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("slipway.toml"),
            r#"
[release]
package = "esp-hal"

[[targets]]
triple = "a"
family = "xtensa"
"#,
        )
        .unwrap();

        let (manifest, _) = SlipwayManifest::find_and_load(dir.path()).unwrap().unwrap();
        // No primary target declared.
        assert!(manifest.registry().is_err());
    }

    /// Doctor runs against an empty directory.
    #[test]
    fn doctor_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        commands::doctor::run(dir.path()).unwrap();
    }
}
