//! File system utilities for weapon discovery

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Collect files directly inside `path` matching one of `extensions`, sorted by name
///
/// Extension should not include the dot (e.g., "json" not ".json").
pub fn collect_files_with_extension(path: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(path)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();

        let matches = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);

        if matches {
            files.push(file_path.to_path_buf());
        }
    }

    Ok(files)
}

/// Weapon ids derived from `<id>.json` file stems in `weapons_dir`
pub fn scan_weapon_ids(weapons_dir: &Path) -> Result<Vec<String>> {
    if !weapons_dir.is_dir() {
        bail!("Weapons directory not found: {}", weapons_dir.display());
    }

    Ok(collect_files_with_extension(weapons_dir, &["json"])?
        .iter()
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
        .map(str::to_string)
        .collect())
}

/// Pick the weapon ids to process
///
/// Explicit ids win; otherwise the weapon list file is used if it exists,
/// and the weapons cache directory is scanned as a last resort.
pub fn discover_weapon_ids(
    explicit: Vec<String>,
    weapon_list: &Path,
    weapons_dir: &Path,
) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit);
    }

    if weapon_list.exists() {
        tracing::debug!("Reading weapon ids from {}", weapon_list.display());
        return armory::read_weapon_list(weapon_list)
            .with_context(|| format!("Failed to load weapon list {}", weapon_list.display()));
    }

    tracing::info!(
        "{} not found, scanning {}",
        weapon_list.display(),
        weapons_dir.display()
    );
    scan_weapon_ids(weapons_dir)
}
