//! `slipway target` — inspect the release target matrix.

use anyhow::Result;

use slipway_targets::TargetRegistry;
use slipway_toolchain::{select_recipe, ChannelConfig};

/// List the targets in run order.
pub fn list(registry: &TargetRegistry) -> Result<()> {
    println!("Release targets ({}):", registry.len());
    for target in registry.iter() {
        println!("  {target}");
    }
    Ok(())
}

/// Show one target's details, including its toolchain recipe.
pub fn describe(registry: &TargetRegistry, channels: &ChannelConfig, triple: &str) -> Result<()> {
    let target = registry.get(triple)?;
    let recipe = select_recipe(target, channels);

    println!("Target:  {}", target.triple);
    println!("Family:  {}", target.family);
    println!("Primary: {}", if target.primary { "yes" } else { "no" });
    println!("Channel: {}", recipe.channel);
    if !recipe.components.is_empty() {
        println!("Components: {}", recipe.components.join(", "));
    }
    if let Some(extra) = &recipe.extra_target {
        println!("Extra target: {extra}");
    }
    Ok(())
}
