//! The release run loop.

use std::path::Path;

use slipway_docs::deploy_if_gated;
use slipway_publish::{PublishError, RegistryToken};
use slipway_tag::cut_release;
use slipway_targets::Target;
use slipway_toolchain::select_recipe;

use crate::config::{Collaborators, PipelineConfig};
use crate::context::TargetContext;
use crate::error::{PipelineError, Result};
use crate::report::{RunReport, TargetOutcome};

/// Execute a release run.
///
/// Iterates the registry in order; each target gets a fresh toolchain,
/// build, publish, and doc generation, with deployment decided by the
/// gate. The Release Tagger runs strictly after the iteration — a barrier,
/// never interleaved — and only when every target succeeded.
pub fn run(
    config: &PipelineConfig,
    token: &RegistryToken,
    seams: &Collaborators<'_>,
    scratch_root: &Path,
) -> Result<RunReport> {
    let mut outcomes: Vec<TargetOutcome> = Vec::new();
    let mut failures: Vec<String> = Vec::new();

    for target in config.registry.iter() {
        match run_target(config, token, seams, scratch_root, target) {
            Ok(outcome) => {
                if let Some(first) = outcomes.first() {
                    if first.version != outcome.version {
                        return Err(PipelineError::VersionDrift {
                            triple: outcome.triple,
                            expected: first.version.clone(),
                            found: outcome.version,
                        });
                    }
                }
                outcomes.push(outcome);
            }
            Err(e) => {
                // The credential is shared: once it is rejected, no further
                // target can publish either.
                if matches!(e, PipelineError::Publish(PublishError::Auth { .. })) {
                    return Err(e);
                }
                if config.fail_fast {
                    return Err(e);
                }
                eprintln!("error: target '{}': {e}", target.triple);
                failures.push(target.triple.clone());
            }
        }
    }

    if !failures.is_empty() {
        return Err(PipelineError::TargetsFailed { failures });
    }

    let tag = cut_release(seams.metadata, seams.tagger, &config.package)?;

    Ok(RunReport { outcomes, tag })
}

fn run_target(
    config: &PipelineConfig,
    token: &RegistryToken,
    seams: &Collaborators<'_>,
    scratch_root: &Path,
    target: &Target,
) -> Result<TargetOutcome> {
    println!("Target: {target}");

    let recipe = select_recipe(target, &config.channels);
    let toolchain = seams.installer.install(&target.triple, &recipe)?;

    let ctx = TargetContext {
        target: target.clone(),
        toolchain,
        workdir: TargetContext::workdir_for(scratch_root, target),
    };
    std::fs::create_dir_all(&ctx.workdir)?;

    let result = run_target_steps(config, token, seams, &ctx);

    // The context's scratch directory (non-deployed doc trees included) is
    // discarded with the pipeline, success or not.
    if ctx.workdir.exists() {
        let _ = std::fs::remove_dir_all(&ctx.workdir);
    }

    result
}

fn run_target_steps(
    config: &PipelineConfig,
    token: &RegistryToken,
    seams: &Collaborators<'_>,
    ctx: &TargetContext,
) -> Result<TargetOutcome> {
    let artifact = seams.builder.build(&ctx.toolchain, &ctx.target, &config.build)?;
    let published = seams.publisher.publish(&artifact, token)?;

    let tree = seams
        .docs
        .generate(&ctx.toolchain, &ctx.target, &config.package, &ctx.doc_root())?;
    let deployed = deploy_if_gated(
        &config.gate,
        &ctx.target,
        &config.trigger,
        &tree,
        seams.deployer,
    )?;
    if deployed {
        println!("  docs deployed ({})", ctx.target.triple);
    }

    Ok(TargetOutcome {
        triple: ctx.target.triple.clone(),
        version: published.version,
        docs_deployed: deployed,
    })
}
