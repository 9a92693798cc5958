//! Attachment catalog loading and validation
//!
//! Turns the raw per-weapon JSON (weapon/build file and premium-modifiers
//! file) into strict typed records. Every failure names the offending
//! path, e.g. `attachments[3].point must be a number`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Slot that ranks candidates by the scope tier list instead of cost
pub const SCOPE_SLOT: &str = "scope";

/// Malformed or missing field in one weapon's input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{origin}: {detail}")]
pub struct ValidationError {
    /// Input the error came from (usually a file path)
    pub origin: String,
    /// Offending path and reason
    pub detail: String,
}

impl ValidationError {
    fn new(origin: &str, detail: impl Into<String>) -> Self {
        Self {
            origin: origin.to_string(),
            detail: detail.into(),
        }
    }
}

/// Display metadata for a slot, redundant with `slot_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub id: String,
    pub name: String,
}

/// An equippable weapon part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_name: Option<String>,
    pub slot_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub point: u32,
    pub unlock_at_weapon_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_stats: Option<Map<String, Value>>,
}

impl Attachment {
    /// Whether the attachment can be equipped at `level`
    pub fn is_unlocked_at(&self, level: u32) -> bool {
        self.unlock_at_weapon_level <= level
    }
}

/// Per-attachment score from the premium modifiers
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentScore {
    pub attachment_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PremiumModifiers {
    pub attachment_scores: Vec<AttachmentScore>,
    pub recommended_magazine_capacity: Option<f64>,
}

impl PremiumModifiers {
    /// Attachment ids with a negative score; never picked as filler
    pub fn banned_patterns(&self) -> Vec<String> {
        self.attachment_scores
            .iter()
            .filter(|s| s.score < 0.0)
            .map(|s| s.attachment_id.clone())
            .collect()
    }
}

/// Contents of a premium-modifiers file
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumMeta {
    pub premium_modifiers: PremiumModifiers,
    pub mandatory_slots: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub scope_tier_list: Vec<String>,
}

/// Playstyle descriptor attached to a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playstyle {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reference from a build to a catalog attachment
#[derive(Debug, Clone, PartialEq)]
pub struct BuildAttachmentRef {
    pub id: String,
    pub slot_id: String,
    pub point: Option<u32>,
    pub unlock_at_weapon_level: Option<u32>,
    pub description: Option<String>,
}

/// A recommended end-state loadout
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub id: String,
    pub description: Option<String>,
    pub playstyle_id: Option<String>,
    pub playstyle: Option<Playstyle>,
    pub attachments: Vec<BuildAttachmentRef>,
}

/// Contents of a weapon file
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponFile {
    pub id: String,
    pub name: String,
    pub builds: Vec<Build>,
}

/// Read-only lookup view over a weapon's premium metadata
#[derive(Debug, Clone)]
pub struct Catalog {
    attachments: Vec<Attachment>,
    by_id: BTreeMap<String, usize>,
    mandatory_slots: Vec<String>,
    scope_ranks: BTreeMap<String, usize>,
    banned_patterns: Vec<String>,
}

impl Catalog {
    pub fn new(meta: PremiumMeta) -> Self {
        let by_id = meta
            .attachments
            .iter()
            .enumerate()
            .map(|(index, a)| (a.id.clone(), index))
            .collect();

        // Later duplicates in the tier list overwrite earlier ranks
        let mut scope_ranks = BTreeMap::new();
        for (rank, id) in meta.scope_tier_list.iter().enumerate() {
            scope_ranks.insert(id.clone(), rank);
        }

        Self {
            banned_patterns: meta.premium_modifiers.banned_patterns(),
            attachments: meta.attachments,
            by_id,
            mandatory_slots: meta.mandatory_slots,
            scope_ranks,
        }
    }

    /// All attachments in catalog order
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn get(&self, id: &str) -> Option<&Attachment> {
        self.by_id.get(id).map(|&index| &self.attachments[index])
    }

    pub fn mandatory_slots(&self) -> &[String] {
        &self.mandatory_slots
    }

    /// Attachments occupying `slot_id`, in catalog order
    pub fn in_slot<'a>(&'a self, slot_id: &'a str) -> impl Iterator<Item = &'a Attachment> + 'a {
        self.attachments.iter().filter(move |a| a.slot_id == slot_id)
    }

    /// Position in the scope tier list, highest priority first
    pub fn scope_rank(&self, id: &str) -> Option<usize> {
        self.scope_ranks.get(id).copied()
    }

    /// Substring match: a banned `foregrip-bad` also bans `foregrip-bad-v2`
    pub fn is_banned_as_filler(&self, attachment: &Attachment) -> bool {
        self.banned_patterns
            .iter()
            .any(|pattern| attachment.id.contains(pattern.as_str()))
    }
}

// -----------------------------------------------------------------------------
// Field helpers
// -----------------------------------------------------------------------------

fn as_record<'a>(
    value: &'a Value,
    origin: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(origin, format!("{} is not an object", path)))
}

fn required_str(
    record: &Map<String, Value>,
    key: &str,
    origin: &str,
    path: &str,
) -> Result<String, ValidationError> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::new(origin, format!("{}{} must be a string", path, key)))
}

fn optional_str(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Parse a non-negative integer, accepting whole floats like `5.0`
fn to_level_or_points(value: &Value) -> Option<Result<u32, ()>> {
    let number = value.as_f64()?;
    if let Some(n) = value.as_u64() {
        return Some(u32::try_from(n).map_err(|_| ()));
    }
    if number >= 0.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX) {
        Some(Ok(number as u32))
    } else {
        Some(Err(()))
    }
}

fn required_u32(
    record: &Map<String, Value>,
    key: &str,
    origin: &str,
    path: &str,
) -> Result<u32, ValidationError> {
    match record.get(key).and_then(to_level_or_points) {
        Some(Ok(n)) => Ok(n),
        Some(Err(())) => Err(ValidationError::new(
            origin,
            format!("{}{} must be a non-negative integer", path, key),
        )),
        None => Err(ValidationError::new(
            origin,
            format!("{}{} must be a number", path, key),
        )),
    }
}

fn optional_u32(record: &Map<String, Value>, key: &str) -> Option<u32> {
    record
        .get(key)
        .and_then(to_level_or_points)
        .and_then(Result::ok)
}

fn required_array<'a>(
    record: &'a Map<String, Value>,
    key: &str,
    origin: &str,
    path: &str,
) -> Result<&'a Vec<Value>, ValidationError> {
    record
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::new(origin, format!("{}{} must be an array", path, key)))
}

fn string_entries(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

// -----------------------------------------------------------------------------
// Premium-modifiers file
// -----------------------------------------------------------------------------

fn parse_attachment(
    value: &Value,
    index: usize,
    origin: &str,
) -> Result<Attachment, ValidationError> {
    let path = format!("attachments[{}]", index);
    let record = as_record(value, origin, &path)?;
    let prefix = format!("{}.", path);

    let id = required_str(record, "id", origin, &prefix)?;
    let name = required_str(record, "name", origin, &prefix)?;
    let slot_id = required_str(record, "slotId", origin, &prefix)?;
    let point = required_u32(record, "point", origin, &prefix)?;
    let unlock_at_weapon_level = required_u32(record, "unlockAtWeaponLevel", origin, &prefix)?;

    let slot = record.get("slot").and_then(Value::as_object).map(|slot| {
        let id = optional_str(slot, "id").unwrap_or_else(|| slot_id.clone());
        let name = optional_str(slot, "name").unwrap_or_else(|| id.clone());
        SlotInfo { id, name }
    });

    Ok(Attachment {
        id,
        name,
        summary_name: optional_str(record, "summaryName"),
        description: optional_str(record, "description"),
        point,
        unlock_at_weapon_level,
        slot,
        attachment_stats: record.get("attachmentStats").and_then(Value::as_object).cloned(),
        slot_id,
    })
}

/// Validate the `attachments` array of a premium-modifiers record
///
/// Shared by the progression pipeline and the weapon-details generator,
/// which needs the attachments without the mandatory-slot requirements.
pub fn parse_attachments(raw: &Value, origin: &str) -> Result<Vec<Attachment>, ValidationError> {
    let root = as_record(raw, origin, "root")?;
    let entries = required_array(root, "attachments", origin, "")?;

    let mut seen = HashSet::new();
    let mut attachments = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let attachment = parse_attachment(entry, index, origin)?;
        if !seen.insert(attachment.id.clone()) {
            return Err(ValidationError::new(
                origin,
                format!("attachments[{}].id \"{}\" is duplicated", index, attachment.id),
            ));
        }
        attachments.push(attachment);
    }
    Ok(attachments)
}

fn parse_premium_modifiers(
    root: &Map<String, Value>,
    origin: &str,
) -> Result<PremiumModifiers, ValidationError> {
    let Some(modifiers) = root.get("premiumModifiers").and_then(Value::as_object) else {
        return Ok(PremiumModifiers::default());
    };

    let mut attachment_scores = Vec::new();
    if let Some(scores) = modifiers.get("attachmentScores").and_then(Value::as_array) {
        for (index, score) in scores.iter().filter_map(Value::as_object).enumerate() {
            match (
                score.get("attachmentId").and_then(Value::as_str),
                score.get("score").and_then(Value::as_f64),
            ) {
                (Some(attachment_id), Some(score)) => attachment_scores.push(AttachmentScore {
                    attachment_id: attachment_id.to_string(),
                    score,
                }),
                _ => {
                    return Err(ValidationError::new(
                        origin,
                        format!("premiumModifiers.attachmentScores[{}] invalid", index),
                    ))
                }
            }
        }
    }

    Ok(PremiumModifiers {
        attachment_scores,
        recommended_magazine_capacity: modifiers
            .get("recommendedMagazineCapacity")
            .and_then(Value::as_f64),
    })
}

/// Validate a premium-modifiers record
pub fn parse_premium_meta(raw: &Value, origin: &str) -> Result<PremiumMeta, ValidationError> {
    let root = as_record(raw, origin, "root")?;

    let mandatory_slots = string_entries(required_array(root, "mandatorySlots", origin, "")?);
    if mandatory_slots.is_empty() {
        return Err(ValidationError::new(
            origin,
            "mandatorySlots must contain at least one slot id",
        ));
    }

    let scope_tier_list = string_entries(required_array(root, "scopeTierList", origin, "")?);
    let attachments = parse_attachments(raw, origin)?;
    let premium_modifiers = parse_premium_modifiers(root, origin)?;

    Ok(PremiumMeta {
        premium_modifiers,
        mandatory_slots,
        attachments,
        scope_tier_list,
    })
}

// -----------------------------------------------------------------------------
// Weapon file
// -----------------------------------------------------------------------------

fn parse_build_ref(
    value: &Value,
    path: &str,
    origin: &str,
) -> Result<BuildAttachmentRef, ValidationError> {
    let record = as_record(value, origin, path)?;
    let prefix = format!("{}.", path);
    Ok(BuildAttachmentRef {
        id: required_str(record, "id", origin, &prefix)?,
        slot_id: required_str(record, "slotId", origin, &prefix)?,
        point: optional_u32(record, "point"),
        unlock_at_weapon_level: optional_u32(record, "unlockAtWeaponLevel"),
        description: optional_str(record, "description"),
    })
}

fn parse_playstyle(record: &Map<String, Value>) -> Playstyle {
    Playstyle {
        id: optional_str(record, "id").unwrap_or_else(|| "unknown-playstyle".to_string()),
        name: optional_str(record, "name").unwrap_or_else(|| "Unknown".to_string()),
        description: optional_str(record, "description"),
    }
}

fn parse_build(value: &Value, index: usize, origin: &str) -> Result<Build, ValidationError> {
    let path = format!("builds[{}]", index);
    let record = as_record(value, origin, &path)?;
    let prefix = format!("{}.", path);

    let id = required_str(record, "id", origin, &prefix)?;
    let attachments = required_array(record, "attachments", origin, &prefix)?
        .iter()
        .enumerate()
        .map(|(j, entry)| parse_build_ref(entry, &format!("{}.attachments[{}]", path, j), origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Build {
        id,
        description: optional_str(record, "description"),
        playstyle_id: optional_str(record, "playstyleId"),
        playstyle: record
            .get("playstyle")
            .and_then(Value::as_object)
            .map(parse_playstyle),
        attachments,
    })
}

/// Validate a weapon/build record
pub fn parse_weapon_file(raw: &Value, origin: &str) -> Result<WeaponFile, ValidationError> {
    let root = as_record(raw, origin, "root")?;

    let id = required_str(root, "id", origin, "")?;
    let name = required_str(root, "name", origin, "")?;
    let builds = required_array(root, "builds", origin, "")?
        .iter()
        .enumerate()
        .map(|(index, build)| parse_build(build, index, origin))
        .collect::<Result<Vec<_>, _>>()?;

    if builds.is_empty() {
        return Err(ValidationError::new(origin, "builds cannot be empty"));
    }

    Ok(WeaponFile { id, name, builds })
}
