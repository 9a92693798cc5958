//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up armory CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `cache_dir` - Optional default cache directory
/// * `output_dir` - Optional default output directory
/// * `weapon_list` - Optional default weapon list file
/// * `show` - If true, show current configuration
pub fn handle(
    cache_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    weapon_list: Option<PathBuf>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if apply(&mut config, cache_dir, output_dir, weapon_list) {
        let path = config.save()?;
        println!("Config saved to: {}", path.display());
        show_config(&config);
    } else {
        show_usage();
    }

    Ok(())
}

/// Apply the provided settings, returning whether anything changed
fn apply(
    config: &mut Config,
    cache_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    weapon_list: Option<PathBuf>,
) -> bool {
    let mut changed = false;
    if let Some(dir) = cache_dir {
        config.cache_dir = Some(dir);
        changed = true;
    }
    if let Some(dir) = output_dir {
        config.output_dir = Some(dir);
        changed = true;
    }
    if let Some(path) = weapon_list {
        config.weapon_list = Some(path);
        changed = true;
    }
    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    if config.is_empty() {
        println!("No defaults configured");
    }

    let show = |label: &str, value: &Option<PathBuf>| {
        if let Some(path) = value {
            println!("{}: {}", label, path.display());
        }
    };
    show("Cache directory", &config.cache_dir);
    show("Output directory", &config.output_dir);
    show("Weapon list", &config.weapon_list);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: armory configure --cache-dir DIR --output-dir DIR --weapon-list FILE");
    println!("   or: armory configure --show");
    println!();
    println!("Note: ARMORY_CACHE_DIR and ARMORY_OUTPUT_DIR override the configured");
    println!("      directories; command-line flags override both.");
}
