//! `slipway plan` — print the per-target release plan without side effects.

use anyhow::Result;
use serde::Serialize;

use slipway_pipeline::PipelineConfig;
use slipway_toolchain::select_recipe;

/// One target's planned steps.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanTarget {
    /// The target triple.
    pub triple: String,
    /// Toolchain family.
    pub family: String,
    /// Channel that would be installed.
    pub channel: String,
    /// Components that would be added.
    pub components: Vec<String>,
    /// Extra compilation target registered with the channel.
    pub extra_target: Option<String>,
    /// Whether this target's docs would be publicly deployed.
    pub deploys_docs: bool,
}

/// The whole run, laid out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Plan {
    /// Package under release.
    pub package: String,
    /// Branch the run would execute against.
    pub branch: String,
    /// The designated release branch.
    pub release_branch: String,
    /// Whether the run aborts on the first target failure.
    pub fail_fast: bool,
    /// Per-target steps, in run order.
    pub targets: Vec<PlanTarget>,
    /// Shape of the tag that would be created.
    pub tag_format: String,
}

/// Lay out the plan for a pipeline configuration. Pure: no tool is invoked.
pub fn build_plan(config: &PipelineConfig) -> Plan {
    let targets = config
        .registry
        .iter()
        .map(|target| {
            let recipe = select_recipe(target, &config.channels);
            PlanTarget {
                triple: target.triple.clone(),
                family: target.family.to_string(),
                channel: recipe.channel,
                components: recipe.components,
                extra_target: recipe.extra_target,
                deploys_docs: config.gate.should_deploy(target, &config.trigger),
            }
        })
        .collect();

    Plan {
        package: config.package.clone(),
        branch: config.trigger.branch.clone(),
        release_branch: config.gate.release_branch.clone(),
        fail_fast: config.fail_fast,
        targets,
        tag_format: "v<version>".to_string(),
    }
}

/// Print a plan, human-readable or JSON.
pub fn print_plan(plan: &Plan, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    println!("Release plan for '{}'", plan.package);
    println!(
        "Branch: {} (release branch: {}, fail-fast: {})",
        plan.branch, plan.release_branch, plan.fail_fast
    );
    println!();
    for target in &plan.targets {
        println!("  {} [{}]", target.triple, target.family);
        println!("    install {}", target.channel);
        for component in &target.components {
            println!("    add component {component}");
        }
        if let Some(extra) = &target.extra_target {
            println!("    add target {extra}");
        }
        println!("    build + publish");
        if target.deploys_docs {
            println!("    generate docs -> deploy");
        } else {
            println!("    generate docs (discarded)");
        }
    }
    println!();
    println!("Then: tag {}", plan.tag_format);
    Ok(())
}

/// Entry point for the subcommand.
pub fn run(config: &PipelineConfig, json: bool) -> Result<()> {
    print_plan(&build_plan(config), json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_marks_only_gated_primary_for_deploy() {
        let config = PipelineConfig::new("esp-hal", "main", "main");
        let plan = build_plan(&config);
        let deploying: Vec<&PlanTarget> =
            plan.targets.iter().filter(|t| t.deploys_docs).collect();
        assert_eq!(deploying.len(), 1);
        assert_eq!(deploying[0].triple, "xtensa-esp32-espressif");
    }

    #[test]
    fn plan_off_release_branch_deploys_nothing() {
        let config = PipelineConfig::new("esp-hal", "main", "feature/x");
        let plan = build_plan(&config);
        assert!(plan.targets.iter().all(|t| !t.deploys_docs));
    }

    #[test]
    fn plan_shows_recipes_per_family() {
        let config = PipelineConfig::new("esp-hal", "main", "main");
        let plan = build_plan(&config);

        let xtensa = plan
            .targets
            .iter()
            .find(|t| t.triple == "xtensa-esp32-espressif")
            .unwrap();
        assert_eq!(xtensa.channel, "esp");
        assert!(xtensa.components.is_empty());

        let riscv = plan
            .targets
            .iter()
            .find(|t| t.triple == "riscv32imc-esp-espressif")
            .unwrap();
        assert_eq!(riscv.channel, "nightly");
        assert_eq!(riscv.components, vec!["rust-src".to_string()]);
        assert_eq!(
            riscv.extra_target.as_deref(),
            Some("riscv32imc-esp-espressif")
        );
    }

    #[test]
    fn plan_serializes_to_json() {
        let config = PipelineConfig::new("esp-hal", "main", "main");
        let plan = build_plan(&config);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"tag-format\":\"v<version>\""));
    }
}
