//! Preset listing and inspection.

use super::describe_stage;
use clap::Args;
use fxchain_config::{ConfigError, Preset, factory_presets, get_factory_preset};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (factory name or TOML file); lists factory presets if omitted
    name: Option<String>,

    /// Print the preset as TOML
    #[arg(long, requires = "name")]
    toml: bool,

    /// Save the preset to a TOML file for customization
    #[arg(long, value_name = "FILE", requires = "name")]
    save: Option<PathBuf>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let Some(name) = &args.name else {
        list();
        return Ok(());
    };

    let preset = resolve_preset(name)?;

    if let Some(path) = &args.save {
        preset.save(path)?;
        println!("Saved '{}' to {}", preset.name, path.display());
        return Ok(());
    }

    if args.toml {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("{}", preset.name);
    if let Some(description) = &preset.description {
        println!("  {description}");
    }
    println!();
    if preset.is_empty() {
        println!("  (no stages)");
    }
    for (i, stage) in preset.stages.iter().enumerate() {
        println!("  {}. {}", i + 1, describe_stage(stage));
    }
    Ok(())
}

fn list() {
    println!("Factory presets:\n");
    for preset in factory_presets() {
        println!(
            "  {:<12} {}",
            preset.name.to_lowercase(),
            preset.description.as_deref().unwrap_or("")
        );
    }
}

/// Find a preset by factory name, falling back to a file path.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    let path = Path::new(name);
    if path.exists() {
        return Preset::load(path);
    }
    Err(ConfigError::PresetNotFound(name.to_string()))
}
