//! Precomputed upgrade-path display

use anyhow::{bail, Context, Result};
use armory::batch::PROGRESSION_DIR;
use armory::{BuildProgression, WeaponProgression};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Load a precomputed progression document from the data directory
pub fn load_progression(output_dir: &Path, weapon_id: &str) -> Result<WeaponProgression> {
    let path = output_dir
        .join(PROGRESSION_DIR)
        .join(format!("{}.json", weapon_id));
    let content = fs::read_to_string(&path).with_context(|| {
        format!(
            "Failed to read {} (run `armory precompute {}` first)",
            path.display(),
            weapon_id
        )
    })?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse progression document {}", path.display()))
}

/// Render one build as a level table
pub fn format_build(build: &BuildProgression) -> String {
    let mut out = String::new();
    let _ = write!(out, "Build: {}", build.build_id);
    if let Some(playstyle) = &build.playstyle {
        let _ = write!(out, " [{}]", playstyle.name);
    }
    out.push('\n');
    if let Some(description) = &build.description {
        let _ = writeln!(out, "  {}", description);
    }

    let _ = writeln!(out, "  {:>5}  {:>6}  Attachments", "Level", "Points");
    for level in &build.levels {
        let attachments = level
            .attachments
            .iter()
            .map(|a| format!("{}={}", a.slot_id, a.attachment_id))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  {:>5}  {:>6}  {}",
            level.level, level.total_points, attachments
        );
    }
    out
}

/// Handle the show command
pub fn handle(output_dir: &Path, weapon_id: &str, build_id: Option<&str>) -> Result<()> {
    let document = load_progression(output_dir, weapon_id)?;

    println!("{} ({})", document.name, document.weapon_id);

    let builds: Vec<&BuildProgression> = match build_id {
        Some(id) => match document.build(id) {
            Some(build) => vec![build],
            None => {
                let known: Vec<&str> = document
                    .build_progressions
                    .iter()
                    .map(|b| b.build_id.as_str())
                    .collect();
                bail!(
                    "Unknown build '{}' for {}. Available: {}",
                    id,
                    weapon_id,
                    known.join(", ")
                );
            }
        },
        None => document.build_progressions.iter().collect(),
    };

    for build in builds {
        println!();
        print!("{}", format_build(build));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory::{ProgressionLevel, SlotAssignment};

    fn sample() -> WeaponProgression {
        WeaponProgression {
            weapon_id: "m5a3".into(),
            name: "M5A3".into(),
            build_progressions: vec![BuildProgression {
                build_id: "long-range".into(),
                description: Some("Hold the lane".into()),
                playstyle_id: None,
                playstyle: None,
                levels: vec![
                    ProgressionLevel {
                        level: 0,
                        total_points: 5,
                        attachments: vec![SlotAssignment {
                            slot_id: "scope".into(),
                            attachment_id: "scope-red".into(),
                        }],
                    },
                    ProgressionLevel {
                        level: 12,
                        total_points: 45,
                        attachments: vec![
                            SlotAssignment {
                                slot_id: "barrel".into(),
                                attachment_id: "barrel-heavy".into(),
                            },
                            SlotAssignment {
                                slot_id: "scope".into(),
                                attachment_id: "scope-3x".into(),
                            },
                        ],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_format_build() {
        let text = format_build(&sample().build_progressions[0]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Build: long-range");
        assert_eq!(lines[1], "  Hold the lane");
        assert_eq!(lines[3], "      0       5  scope=scope-red");
        assert_eq!(lines[4], "     12      45  barrel=barrel-heavy, scope=scope-3x");
    }

    #[test]
    fn test_show_reads_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join(PROGRESSION_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("m5a3.json"),
            serde_json::to_string_pretty(&sample()).unwrap(),
        )
        .unwrap();

        assert_eq!(load_progression(temp_dir.path(), "m5a3").unwrap(), sample());
        assert!(handle(temp_dir.path(), "m5a3", Some("long-range")).is_ok());
        assert!(handle(temp_dir.path(), "m5a3", Some("missing")).is_err());
        assert!(handle(temp_dir.path(), "kord", None).is_err());
    }
}
