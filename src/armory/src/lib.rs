//! # armory
//!
//! Weapon upgrade-path precomputation for a loadout browsing site.
//!
//! This library provides functionality to:
//! - Validate raw weapon/build and premium-modifiers JSON
//! - Pick the best loadout at every weapon level under a point budget
//! - Compact per-level loadouts into the levels where something changes
//! - Batch-write progression and weapon-details documents
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = armory::CacheLayout::new(Path::new(".cache"));
//! let (weapon, catalog) = armory::load_weapon_inputs(&layout, "m5a3")?;
//!
//! let document = armory::build_weapon_progression(
//!     &weapon,
//!     &catalog,
//!     armory::Limits::default(),
//!     &armory::TracingDiagnostics,
//! );
//!
//! for build in &document.build_progressions {
//!     println!("{}: {} change points", build.build_id, build.levels.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod catalog;
pub mod details;
pub mod diagnostics;
pub mod document;
pub mod loadout;
pub mod progression;
pub mod select;

#[cfg(test)]
mod fixtures;

// Re-export commonly used items
#[doc(inline)]
pub use batch::{
    load_weapon_inputs, precompute_weapon, precompute_weapons, read_weapon_list,
    write_json_pretty, BatchError, BatchReport, CacheLayout, SkippedWeapon, WeaponError,
};
#[doc(inline)]
pub use catalog::{
    parse_attachments, parse_premium_meta, parse_weapon_file, Attachment, Build, Catalog,
    PremiumMeta, ValidationError, WeaponFile,
};
#[doc(inline)]
pub use details::{build_weapon_details, generate_weapon_details, simplify_tierlist, WeaponDetails};
#[doc(inline)]
pub use diagnostics::{Diagnostics, NoDiagnostics, TracingDiagnostics};
#[doc(inline)]
pub use document::{build_weapon_progression, BuildProgression, ProgressionLevel, WeaponProgression};
#[doc(inline)]
pub use loadout::{LevelState, Loadout, SlotAssignment};
#[doc(inline)]
pub use progression::{compute_progression, Progression};
#[doc(inline)]
pub use select::{
    compute_base_loadout, compute_exact_final_loadout, compute_loadout_for_level, Limits,
    MandatoryPolicy, Selector, MAX_LEVEL, MAX_POINTS,
};
