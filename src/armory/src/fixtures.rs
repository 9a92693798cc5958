//! Catalog and build builders shared by the unit tests

use crate::catalog::{
    Attachment, AttachmentScore, Build, BuildAttachmentRef, Catalog, PremiumMeta, PremiumModifiers,
};

pub fn attachment(id: &str, slot_id: &str, point: u32, unlock: u32) -> Attachment {
    Attachment {
        id: id.to_string(),
        name: id.to_uppercase(),
        summary_name: None,
        slot_id: slot_id.to_string(),
        description: None,
        point,
        unlock_at_weapon_level: unlock,
        slot: None,
        attachment_stats: None,
    }
}

pub fn catalog(
    mandatory: &[&str],
    scope_tiers: &[&str],
    banned: &[&str],
    attachments: Vec<Attachment>,
) -> Catalog {
    Catalog::new(PremiumMeta {
        premium_modifiers: PremiumModifiers {
            attachment_scores: banned
                .iter()
                .map(|id| AttachmentScore {
                    attachment_id: id.to_string(),
                    score: -1.0,
                })
                .collect(),
            recommended_magazine_capacity: None,
        },
        mandatory_slots: mandatory.iter().map(|s| s.to_string()).collect(),
        attachments,
        scope_tier_list: scope_tiers.iter().map(|s| s.to_string()).collect(),
    })
}

/// Build targeting `(attachment_id, slot_id)` pairs
pub fn build(id: &str, targets: &[(&str, &str)]) -> Build {
    Build {
        id: id.to_string(),
        description: Some(format!("{} build", id)),
        playstyle_id: None,
        playstyle: None,
        attachments: targets
            .iter()
            .map(|(attachment_id, slot_id)| BuildAttachmentRef {
                id: attachment_id.to_string(),
                slot_id: slot_id.to_string(),
                point: None,
                unlock_at_weapon_level: None,
                description: None,
            })
            .collect(),
    }
}

/// A small rifle catalog with every slot kind the engine cares about
pub fn rifle_catalog() -> Catalog {
    catalog(
        &["scope", "receiver", "magazine"],
        &["scope-holo", "scope-3x", "scope-red"],
        &["grip-bad"],
        vec![
            attachment("scope-red", "scope", 5, 0),
            attachment("scope-holo", "scope", 10, 6),
            attachment("scope-3x", "scope", 15, 12),
            attachment("recv-std", "receiver", 0, 0),
            attachment("recv-heavy", "receiver", 20, 15),
            attachment("mag-20", "magazine", 5, 0),
            attachment("mag-30", "magazine", 15, 8),
            attachment("barrel-short", "barrel", 10, 3),
            attachment("barrel-heavy", "barrel", 30, 20),
            attachment("grip-angled", "underbarrel", 15, 5),
            attachment("grip-bad", "underbarrel", 25, 2),
            attachment("grip-bad-v2", "underbarrel", 40, 9),
            attachment("laser-red", "laser", 20, 10),
            attachment("muzzle-comp", "muzzle", 35, 18),
        ],
    )
}

pub fn rifle_build() -> Build {
    build(
        "long-range",
        &[
            ("scope-3x", "scope"),
            ("barrel-heavy", "barrel"),
            ("mag-30", "magazine"),
            ("grip-angled", "underbarrel"),
        ],
    )
}
