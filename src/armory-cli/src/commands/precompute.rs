//! Upgrade-path precomputation command handler

use anyhow::{bail, Result};
use armory::batch::PROGRESSION_DIR;
use armory::{BatchReport, CacheLayout, Limits, TracingDiagnostics};

use crate::config::Paths;
use crate::file_utils::discover_weapon_ids;

/// Handle the precompute command
///
/// Fails when no weapon could be written, so scripted runs notice.
pub fn handle(weapon_ids: Vec<String>, paths: &Paths, limits: Limits) -> Result<BatchReport> {
    let layout = CacheLayout::new(&paths.cache_dir);
    let weapon_ids = discover_weapon_ids(weapon_ids, &paths.weapon_list, &layout.weapons_dir)?;
    let output_dir = paths.output_dir.join(PROGRESSION_DIR);

    tracing::info!(
        "Precomputing {} weapons (max level {}, budget {})",
        weapon_ids.len(),
        limits.max_level,
        limits.max_points
    );

    let report = armory::precompute_weapons(
        &weapon_ids,
        &layout,
        &output_dir,
        limits,
        &TracingDiagnostics,
    )?;

    println!(
        "Wrote {} of {} weapons to {}",
        report.written.len(),
        report.total(),
        output_dir.display()
    );
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.weapon_id, skipped.reason);
    }

    if report.written.is_empty() {
        bail!("No weapon progressions were written");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn seed(cache_dir: &Path) {
        let layout = CacheLayout::new(cache_dir);
        fs::create_dir_all(&layout.weapons_dir).unwrap();
        fs::create_dir_all(&layout.premium_dir).unwrap();
        fs::write(
            layout.weapon_path("m5a3"),
            json!({
                "id": "m5a3",
                "name": "M5A3",
                "builds": [{ "id": "default", "attachments": [{ "id": "recv-std", "slotId": "receiver" }] }]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            layout.premium_path("m5a3"),
            json!({
                "mandatorySlots": ["receiver"],
                "scopeTierList": [],
                "attachments": [
                    { "id": "recv-std", "name": "Standard", "slotId": "receiver", "point": 0, "unlockAtWeaponLevel": 0 }
                ]
            })
            .to_string(),
        )
        .unwrap();
    }

    fn paths(root: &Path) -> Paths {
        Paths {
            cache_dir: root.join("cache"),
            output_dir: root.join("data"),
            weapon_list: root.join("data").join("weapon_list.json"),
        }
    }

    #[test]
    fn test_precompute_scans_cache() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = paths(temp_dir.path());
        seed(&paths.cache_dir);

        let report = handle(Vec::new(), &paths, Limits::default()).unwrap();
        let written = paths.output_dir.join(PROGRESSION_DIR).join("m5a3.json");
        assert_eq!(report.written, vec![written.clone()]);
        assert!(written.exists());
    }

    #[test]
    fn test_precompute_fails_when_nothing_written() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = paths(temp_dir.path());
        seed(&paths.cache_dir);

        let result = handle(vec!["ghost".into()], &paths, Limits::default());
        assert!(result.is_err());
    }
}
