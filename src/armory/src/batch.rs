//! Batch precomputation over cached weapon inputs
//!
//! Reads `<cache>/weapons/<id>.json` and `<cache>/premium-modifiers/<id>.json`
//! for every requested weapon, runs the orchestrator, and writes one
//! progression document per weapon. A weapon that fails to load or
//! validate is logged and skipped; the rest of the batch continues.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{parse_premium_meta, parse_weapon_file, Catalog, ValidationError, WeaponFile};
use crate::diagnostics::Diagnostics;
use crate::document::build_weapon_progression;
use crate::select::Limits;

/// Cache subdirectory holding weapon/build files
pub const WEAPONS_DIR: &str = "weapons";

/// Cache subdirectory holding premium-modifiers files
pub const PREMIUM_DIR: &str = "premium-modifiers";

/// Output subdirectory for progression documents
pub const PROGRESSION_DIR: &str = "precomputed-upgrade-paths";

/// Which per-weapon input a file is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Weapon,
    PremiumModifiers,
    TierList,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::PremiumModifiers => write!(f, "premium-modifiers"),
            Self::TierList => write!(f, "tier list"),
        }
    }
}

/// Failure confined to a single weapon
#[derive(Error, Debug)]
pub enum WeaponError {
    #[error("missing {kind} file at {}", .path.display())]
    MissingInput { kind: InputKind, path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Failure that aborts the whole batch
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("no weapons to process")]
    NoWeapons,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid weapon list {}: {source}", .path.display())]
    WeaponList {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Location of the per-weapon input files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    pub weapons_dir: PathBuf,
    pub premium_dir: PathBuf,
}

impl CacheLayout {
    /// Standard layout under a cache root (usually `.cache`)
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            weapons_dir: cache_dir.join(WEAPONS_DIR),
            premium_dir: cache_dir.join(PREMIUM_DIR),
        }
    }

    pub fn weapon_path(&self, weapon_id: &str) -> PathBuf {
        self.weapons_dir.join(format!("{}.json", weapon_id))
    }

    pub fn premium_path(&self, weapon_id: &str) -> PathBuf {
        self.premium_dir.join(format!("{}.json", weapon_id))
    }
}

/// A weapon that was skipped and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedWeapon {
    pub weapon_id: String,
    pub reason: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedWeapon>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Read and parse a JSON input file, reporting absence as `MissingInput`
pub fn read_json_input(path: &Path, kind: InputKind) -> Result<Value, WeaponError> {
    if !path.exists() {
        return Err(WeaponError::MissingInput {
            kind,
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path).map_err(|source| WeaponError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| WeaponError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty-printed JSON
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}

/// Read a JSON array of weapon ids
pub fn read_weapon_list(path: &Path) -> Result<Vec<String>, BatchError> {
    let raw = fs::read_to_string(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| BatchError::WeaponList {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate both inputs of one weapon
pub fn load_weapon_inputs(
    layout: &CacheLayout,
    weapon_id: &str,
) -> Result<(WeaponFile, Catalog), WeaponError> {
    let weapon_path = layout.weapon_path(weapon_id);
    let premium_path = layout.premium_path(weapon_id);

    let weapon_raw = read_json_input(&weapon_path, InputKind::Weapon)?;
    let premium_raw = read_json_input(&premium_path, InputKind::PremiumModifiers)?;

    let weapon = parse_weapon_file(&weapon_raw, &weapon_path.display().to_string())?;
    let meta = parse_premium_meta(&premium_raw, &premium_path.display().to_string())?;

    Ok((weapon, Catalog::new(meta)))
}

/// Precompute and write the progression document for one weapon
pub fn precompute_weapon(
    layout: &CacheLayout,
    weapon_id: &str,
    output_dir: &Path,
    limits: Limits,
    diagnostics: &dyn Diagnostics,
) -> Result<PathBuf, WeaponError> {
    let (weapon, catalog) = load_weapon_inputs(layout, weapon_id)?;
    let document = build_weapon_progression(&weapon, &catalog, limits, diagnostics);

    let out_path = output_dir.join(format!("{}.json", weapon_id));
    write_json_pretty(&out_path, &document).map_err(|source| WeaponError::Io {
        path: out_path.clone(),
        source,
    })?;
    Ok(out_path)
}

/// Precompute every weapon in `weapon_ids`, skipping the ones that fail
pub fn precompute_weapons(
    weapon_ids: &[String],
    layout: &CacheLayout,
    output_dir: &Path,
    limits: Limits,
    diagnostics: &dyn Diagnostics,
) -> Result<BatchReport, BatchError> {
    if weapon_ids.is_empty() {
        return Err(BatchError::NoWeapons);
    }

    fs::create_dir_all(output_dir).map_err(|source| BatchError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut report = BatchReport::default();
    for weapon_id in weapon_ids {
        match precompute_weapon(layout, weapon_id, output_dir, limits, diagnostics) {
            Ok(path) => {
                tracing::info!("OK: wrote progression for {} -> {}", weapon_id, path.display());
                report.written.push(path);
            }
            Err(err @ WeaponError::MissingInput { .. }) => {
                tracing::warn!("Skipping {}: {}", weapon_id, err);
                report.skipped.push(SkippedWeapon {
                    weapon_id: weapon_id.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                tracing::error!("Error processing weapon \"{}\": {}", weapon_id, err);
                report.skipped.push(SkippedWeapon {
                    weapon_id: weapon_id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}
