//! Weapon details command handler
//!
//! Writes `weapon-details.json` and, when the cache has one, the
//! simplified `tierlist.json`.

use anyhow::{Context, Result};
use armory::details::{load_tierlist, TIERLIST_FILE, WEAPON_DETAILS_FILE};
use armory::CacheLayout;
use std::fs;

use crate::config::Paths;
use crate::file_utils::discover_weapon_ids;

/// Handle the details command, returning the number of weapons written
pub fn handle(paths: &Paths) -> Result<usize> {
    let layout = CacheLayout::new(&paths.cache_dir);
    let weapon_ids = discover_weapon_ids(Vec::new(), &paths.weapon_list, &layout.weapons_dir)?;

    let details = armory::generate_weapon_details(&weapon_ids, &layout);

    fs::create_dir_all(&paths.output_dir).with_context(|| {
        format!("Failed to create output directory {}", paths.output_dir.display())
    })?;

    let details_path = paths.output_dir.join(WEAPON_DETAILS_FILE);
    armory::write_json_pretty(&details_path, &details)
        .with_context(|| format!("Failed to write {}", details_path.display()))?;
    println!(
        "Generated weapon details for {} weapons: {}",
        details.len(),
        details_path.display()
    );

    match load_tierlist(&paths.cache_dir).context("Failed to load cached tier list")? {
        Some(tierlist) => {
            let tierlist_path = paths.output_dir.join(TIERLIST_FILE);
            armory::write_json_pretty(&tierlist_path, &tierlist)
                .with_context(|| format!("Failed to write {}", tierlist_path.display()))?;
            println!("Simplified tier list: {}", tierlist_path.display());
        }
        None => tracing::warn!(
            "{} not found, skipping tier list",
            paths.cache_dir.join(TIERLIST_FILE).display()
        ),
    }

    Ok(details.len())
}
