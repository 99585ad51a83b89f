//! Config command handlers.

use crate::config::{
    discover_config_file, generate_example_config, load_or_default, DEFAULT_CONFIG_FILE_NAME,
};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Print the effective configuration (defaults merged with the config file) as YAML.
pub fn run_config_show(explicit: Option<&Path>) -> Result<()> {
    let (config, loaded_from) = load_or_default(explicit)?;
    match &loaded_from {
        Some(path) => eprintln!("# Loaded from: {}", path.display()),
        None => eprintln!("# No config file found; showing defaults"),
    }
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}

/// Print the search order and the config file that would be used.
pub fn run_config_path(explicit: Option<&Path>) -> Result<()> {
    eprintln!("Config file search paths (in order):");
    for dir in search_dirs().into_iter().flatten() {
        eprintln!("  {}", dir.display());
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in [".sbom-delta.yaml", ".sbom-delta.yml", "sbom-delta.yaml"] {
        eprintln!("  {name}");
    }
    eprintln!();
    match discover_config_file(explicit) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
    Ok(())
}

/// Write an example config file into `dir`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn run_config_init(dir: &Path, force: bool) -> Result<PathBuf> {
    let target = dir.join(DEFAULT_CONFIG_FILE_NAME);
    if target.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            target.display()
        );
    }
    std::fs::write(&target, generate_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("Created {}", target.display());
    Ok(target)
}

fn search_dirs() -> [Option<PathBuf>; 2] {
    [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|p| p.join("sbom-delta")),
    ]
}
