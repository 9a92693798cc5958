//! Loadouts and per-level states

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Catalog;

/// One occupied slot, as written to the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    pub slot_id: String,
    pub attachment_id: String,
}

/// Attachment id per slot, at most one per slot
///
/// Keyed by slot id in sorted order, so equality and iteration never depend
/// on the order in which slots were filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Loadout {
    slots: BTreeMap<String, String>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, slot_id: &str) -> bool {
        self.slots.contains_key(slot_id)
    }

    /// Fill `slot_id` unless it already holds something. Returns true if equipped.
    pub fn equip(&mut self, slot_id: &str, attachment_id: &str) -> bool {
        if self.is_occupied(slot_id) {
            return false;
        }
        self.slots
            .insert(slot_id.to_string(), attachment_id.to_string());
        true
    }

    pub fn get(&self, slot_id: &str) -> Option<&str> {
        self.slots.get(slot_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(slot_id, attachment_id)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(s, a)| (s.as_str(), a.as_str()))
    }

    /// Sum of points over every equipped attachment known to the catalog,
    /// saturating at `u32::MAX`
    pub fn total_points(&self, catalog: &Catalog) -> u32 {
        self.slots
            .values()
            .filter_map(|id| catalog.get(id))
            .map(|a| a.point)
            .fold(0u32, u32::saturating_add)
    }

    pub fn assignments(&self) -> Vec<SlotAssignment> {
        self.iter()
            .map(|(slot_id, attachment_id)| SlotAssignment {
                slot_id: slot_id.to_string(),
                attachment_id: attachment_id.to_string(),
            })
            .collect()
    }
}

impl<S: Into<String>, A: Into<String>> FromIterator<(S, A)> for Loadout {
    fn from_iter<I: IntoIterator<Item = (S, A)>>(iter: I) -> Self {
        let mut loadout = Loadout::new();
        for (slot_id, attachment_id) in iter {
            let slot_id = slot_id.into();
            let attachment_id = attachment_id.into();
            loadout.equip(&slot_id, &attachment_id);
        }
        loadout
    }
}

/// Loadout resolved at one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelState {
    pub level: u32,
    pub loadout: Loadout,
    pub total_points: u32,
}

impl LevelState {
    /// Build a state, deriving the point total from the final assignment
    pub fn new(level: u32, loadout: Loadout, catalog: &Catalog) -> Self {
        let total_points = loadout.total_points(catalog);
        Self {
            level,
            loadout,
            total_points,
        }
    }
}
