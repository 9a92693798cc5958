//! Weapon progression documents
//!
//! Runs the compactor for every build of a weapon and flattens the result
//! into the JSON shape consumed by the viewer.

use serde::{Deserialize, Serialize};

use crate::catalog::{Build, Catalog, Playstyle, WeaponFile};
use crate::diagnostics::Diagnostics;
use crate::loadout::{LevelState, SlotAssignment};
use crate::progression::compute_progression;
use crate::select::{Limits, Selector};

/// One retained level of a build progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionLevel {
    pub level: u32,
    pub total_points: u32,
    pub attachments: Vec<SlotAssignment>,
}

impl From<&LevelState> for ProgressionLevel {
    fn from(state: &LevelState) -> Self {
        Self {
            level: state.level,
            total_points: state.total_points,
            attachments: state.loadout.assignments(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildProgression {
    pub build_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playstyle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playstyle: Option<Playstyle>,
    pub levels: Vec<ProgressionLevel>,
}

/// Output document for one weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponProgression {
    pub weapon_id: String,
    pub name: String,
    pub build_progressions: Vec<BuildProgression>,
}

impl WeaponProgression {
    pub fn build(&self, build_id: &str) -> Option<&BuildProgression> {
        self.build_progressions.iter().find(|b| b.build_id == build_id)
    }
}

fn build_progression(selector: &Selector<'_>, build: &Build) -> BuildProgression {
    let progression = compute_progression(selector, build);
    BuildProgression {
        build_id: build.id.clone(),
        description: build.description.clone(),
        playstyle_id: build.playstyle_id.clone(),
        playstyle: build.playstyle.clone(),
        levels: progression.states.iter().map(ProgressionLevel::from).collect(),
    }
}

/// Assemble the progression document for every build of `weapon`
pub fn build_weapon_progression(
    weapon: &WeaponFile,
    catalog: &Catalog,
    limits: Limits,
    diagnostics: &dyn Diagnostics,
) -> WeaponProgression {
    let selector = Selector::new(catalog, limits, diagnostics);
    let build_progressions = weapon
        .builds
        .iter()
        .map(|build| build_progression(&selector, build))
        .collect();

    WeaponProgression {
        weapon_id: weapon.id.clone(),
        name: weapon.name.clone(),
        build_progressions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{parse_premium_meta, parse_weapon_file};
    use crate::diagnostics::NoDiagnostics;
    use crate::fixtures::{build, rifle_build, rifle_catalog};
    use serde_json::json;

    fn rifle_weapon() -> WeaponFile {
        let mut tactical = build("tactical", &[("scope-holo", "scope"), ("laser-red", "laser")]);
        tactical.playstyle_id = Some("aggressive".into());
        tactical.playstyle = Some(Playstyle {
            id: "aggressive".into(),
            name: "Aggressive".into(),
            description: None,
        });
        WeaponFile {
            id: "m5a3".into(),
            name: "M5A3".into(),
            builds: vec![rifle_build(), tactical],
        }
    }

    #[test]
    fn test_document_has_every_build() {
        let catalog = rifle_catalog();
        let doc = build_weapon_progression(&rifle_weapon(), &catalog, Limits::default(), &NoDiagnostics);

        assert_eq!(doc.weapon_id, "m5a3");
        assert_eq!(doc.build_progressions.len(), 2);
        assert_eq!(doc.build_progressions[0].build_id, "long-range");

        let tactical = doc.build("tactical").unwrap();
        assert_eq!(tactical.playstyle_id.as_deref(), Some("aggressive"));
        assert_eq!(tactical.levels[0].level, 0);
        assert_eq!(tactical.levels.last().map(|l| l.level), Some(40));
    }

    #[test]
    fn test_serialized_shape() {
        let catalog = rifle_catalog();
        let doc = build_weapon_progression(&rifle_weapon(), &catalog, Limits::default(), &NoDiagnostics);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["weaponId"], "m5a3");
        let first = &value["buildProgressions"][0];
        assert_eq!(first["buildId"], "long-range");
        assert_eq!(first["description"], "long-range build");
        assert!(first.get("playstyle").is_none());

        let level0 = &first["levels"][0];
        assert_eq!(level0["level"], 0);
        assert_eq!(level0["totalPoints"], 10);
        assert_eq!(
            level0["attachments"],
            json!([
                { "slotId": "magazine", "attachmentId": "mag-20" },
                { "slotId": "receiver", "attachmentId": "recv-std" },
                { "slotId": "scope", "attachmentId": "scope-red" }
            ])
        );
    }

    #[test]
    fn test_from_raw_inputs() {
        let weapon = parse_weapon_file(
            &json!({
                "id": "kord",
                "name": "KORD 6P67",
                "builds": [{
                    "id": "default",
                    "description": "Standard",
                    "attachments": [{ "id": "barrel-heavy", "slotId": "barrel" }]
                }]
            }),
            "weapon.json",
        )
        .unwrap();
        let meta = parse_premium_meta(
            &json!({
                "mandatorySlots": ["receiver"],
                "scopeTierList": [],
                "attachments": [
                    { "id": "recv-std", "name": "Standard", "slotId": "receiver", "point": 15, "unlockAtWeaponLevel": 0 },
                    { "id": "barrel-light", "name": "Light", "slotId": "barrel", "point": 5, "unlockAtWeaponLevel": 2 },
                    { "id": "barrel-heavy", "name": "Heavy", "slotId": "barrel", "point": 8, "unlockAtWeaponLevel": 20 }
                ]
            }),
            "premium.json",
        )
        .unwrap();

        let catalog = Catalog::new(meta);
        let doc = build_weapon_progression(&weapon, &catalog, Limits::default(), &NoDiagnostics);
        let levels: Vec<u32> = doc.build_progressions[0]
            .levels
            .iter()
            .map(|l| l.level)
            .collect();
        assert_eq!(levels, vec![0, 1, 2, 20, 40]);

        let at_20 = &doc.build_progressions[0].levels[3];
        assert_eq!(at_20.total_points, 8);
        assert_eq!(
            at_20.attachments,
            vec![SlotAssignment {
                slot_id: "barrel".into(),
                attachment_id: "barrel-heavy".into()
            }]
        );
    }

    #[test]
    fn test_document_roundtrips_through_json() {
        let catalog = rifle_catalog();
        let doc = build_weapon_progression(&rifle_weapon(), &catalog, Limits::default(), &NoDiagnostics);
        let text = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: WeaponProgression = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }
}
