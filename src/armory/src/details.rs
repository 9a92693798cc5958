//! Weapon details and tier list documents
//!
//! `weapon-details.json` lists every weapon with its display metadata and
//! full attachment catalog; `tierlist.json` is the cached tier list reduced
//! to its ranking table.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::batch::{read_json_input, CacheLayout, InputKind, WeaponError};
use crate::catalog::{parse_attachments, Attachment, ValidationError};

/// Output file name for the combined details document
pub const WEAPON_DETAILS_FILE: &str = "weapon-details.json";

/// Tier list file name, both in the cache and in the output directory
pub const TIERLIST_FILE: &str = "tierlist.json";

/// Display record for one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDetails {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    pub group: String,
    pub attachments: Vec<Attachment>,
}

fn non_empty_str<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `<key>.name` when present, else the plain `<key>Id` field
fn named_or_id(
    record: &Map<String, Value>,
    key: &str,
    origin: &str,
) -> Result<String, ValidationError> {
    let id_key = format!("{}Id", key);
    record
        .get(key)
        .and_then(Value::as_object)
        .and_then(|nested| non_empty_str(nested, "name"))
        .or_else(|| record.get(&id_key).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| ValidationError {
            origin: origin.to_string(),
            detail: format!("{} must be a string", id_key),
        })
}

/// Descriptions carried by build attachment references, last one wins
fn build_descriptions(weapon: &Map<String, Value>) -> HashMap<String, String> {
    let mut descriptions = HashMap::new();
    let builds = weapon
        .get("builds")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for build in builds {
        let refs = build
            .get("attachments")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for reference in refs.iter().filter_map(Value::as_object) {
            if let (Some(id), Some(description)) = (
                non_empty_str(reference, "id"),
                non_empty_str(reference, "description"),
            ) {
                descriptions.insert(id.to_string(), description.to_string());
            }
        }
    }
    descriptions
}

/// Assemble the details record for one weapon
///
/// `premium_raw` may be absent, in which case the attachment list is empty.
pub fn build_weapon_details(
    weapon_raw: &Value,
    premium_raw: Option<&Value>,
    origin: &str,
) -> Result<WeaponDetails, ValidationError> {
    let weapon = weapon_raw.as_object().ok_or_else(|| ValidationError {
        origin: origin.to_string(),
        detail: "root is not an object".to_string(),
    })?;

    let string_field = |key: &str| {
        weapon
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ValidationError {
                origin: origin.to_string(),
                detail: format!("{} must be a string", key),
            })
    };
    let id = string_field("id")?;
    let name = string_field("name")?;

    let mut attachments = match premium_raw {
        Some(raw) => parse_attachments(raw, origin)?,
        None => Vec::new(),
    };

    let descriptions = build_descriptions(weapon);
    for attachment in &mut attachments {
        let missing = attachment.description.as_deref().map_or(true, str::is_empty);
        if missing {
            if let Some(description) = descriptions.get(&attachment.id) {
                attachment.description = Some(description.clone());
            }
        }
    }

    Ok(WeaponDetails {
        image: format!("/assets/weapons/{}.png", id),
        description: non_empty_str(weapon, "description").map(str::to_string),
        weapon_type: named_or_id(weapon, "weaponType", origin)?,
        group: named_or_id(weapon, "weaponGroup", origin)?,
        attachments,
        id,
        name,
    })
}

fn load_weapon_details(layout: &CacheLayout, weapon_id: &str) -> Result<WeaponDetails, WeaponError> {
    let weapon_path = layout.weapon_path(weapon_id);
    let premium_path = layout.premium_path(weapon_id);

    let weapon_raw = read_json_input(&weapon_path, InputKind::Weapon)?;
    let premium_raw = match read_json_input(&premium_path, InputKind::PremiumModifiers) {
        Ok(raw) => Some(raw),
        Err(WeaponError::MissingInput { .. }) => {
            tracing::warn!(
                "No premium modifiers found for {}, attachments list will be empty",
                weapon_id
            );
            None
        }
        Err(err) => return Err(err),
    };

    let origin = weapon_path.display().to_string();
    Ok(build_weapon_details(&weapon_raw, premium_raw.as_ref(), &origin)?)
}

/// Details for every weapon in `weapon_ids` whose inputs load cleanly
pub fn generate_weapon_details(weapon_ids: &[String], layout: &CacheLayout) -> Vec<WeaponDetails> {
    let mut details = Vec::with_capacity(weapon_ids.len());
    for weapon_id in weapon_ids {
        match load_weapon_details(layout, weapon_id) {
            Ok(weapon) => {
                tracing::info!("Processed {}", weapon_id);
                details.push(weapon);
            }
            Err(err @ WeaponError::MissingInput { .. }) => {
                tracing::warn!("Skipping {}: {}", weapon_id, err);
            }
            Err(err) => {
                tracing::error!("Error processing weapon \"{}\": {}", weapon_id, err);
            }
        }
    }
    details
}

/// Reduce a cached tier list to `{"ranking": ...}`
pub fn simplify_tierlist(raw: &Value) -> Value {
    let ranking = raw
        .pointer("/data/tierList/ranking")
        .filter(|ranking| !ranking.is_null())
        .cloned()
        .unwrap_or_else(|| json!({}));
    json!({ "ranking": ranking })
}

/// Read `<cache>/tierlist.json` if present and return its simplified form
pub fn load_tierlist(cache_dir: &Path) -> Result<Option<Value>, WeaponError> {
    let path = cache_dir.join(TIERLIST_FILE);
    match read_json_input(&path, InputKind::TierList) {
        Ok(raw) => Ok(Some(simplify_tierlist(&raw))),
        Err(WeaponError::MissingInput { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
