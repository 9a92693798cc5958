//! Loadout selection engine
//!
//! Pure functions that pick the loadout for the starting level, for any
//! level before the whole target build is unlocked, and for the final
//! build itself. Nothing here fails for lack of a candidate: a slot with
//! no valid part is simply left empty.

use std::cmp::Ordering;

use crate::catalog::{Attachment, Build, Catalog, SCOPE_SLOT};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::loadout::{LevelState, Loadout};

/// Point budget shared by every attachment the engine adds on its own
pub const MAX_POINTS: u32 = 100;

/// Highest weapon level a progression covers
pub const MAX_LEVEL: u32 = 40;

/// Level range and point budget for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_level: u32,
    pub max_points: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            max_points: MAX_POINTS,
        }
    }
}

/// How a mandatory slot picks among its candidates
///
/// The level-0 loadout and the intermediate levels deliberately use
/// different orderings; they are kept as separate strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MandatoryPolicy {
    /// Scope tier rank (unranked last), then cheapest, then id
    ScopeRanked,
    /// Earliest unlock, then cheapest, then id
    CheapestEarliest,
    /// Most points, then earliest unlock; remaining ties keep catalog order
    MostPoints,
}

/// Descending points, then ascending unlock level
fn most_points_first(a: &Attachment, b: &Attachment) -> Ordering {
    b.point
        .cmp(&a.point)
        .then(a.unlock_at_weapon_level.cmp(&b.unlock_at_weapon_level))
}

impl MandatoryPolicy {
    fn compare(self, catalog: &Catalog, a: &Attachment, b: &Attachment) -> Ordering {
        match self {
            Self::ScopeRanked => {
                let rank = |x: &Attachment| catalog.scope_rank(&x.id).unwrap_or(usize::MAX);
                rank(a)
                    .cmp(&rank(b))
                    .then(a.point.cmp(&b.point))
                    .then_with(|| a.id.cmp(&b.id))
            }
            Self::CheapestEarliest => a
                .unlock_at_weapon_level
                .cmp(&b.unlock_at_weapon_level)
                .then(a.point.cmp(&b.point))
                .then_with(|| a.id.cmp(&b.id)),
            Self::MostPoints => most_points_first(a, b),
        }
    }

    /// First candidate in this policy's order
    pub fn pick<'a, I>(self, catalog: &Catalog, candidates: I) -> Option<&'a Attachment>
    where
        I: IntoIterator<Item = &'a Attachment>,
    {
        // min_by keeps the first of equal elements, matching a stable sort
        candidates
            .into_iter()
            .min_by(|a, b| self.compare(catalog, a, b))
    }
}

/// A build's targets resolved against the catalog
#[derive(Debug, Clone)]
pub struct ResolvedBuild<'a> {
    pub build: &'a Build,
    pub targets: Vec<&'a Attachment>,
    /// Referenced ids the catalog does not know
    pub missing: Vec<String>,
    /// Highest unlock level among resolvable targets
    pub final_unlock_level: u32,
}

impl<'a> ResolvedBuild<'a> {
    pub fn resolve(catalog: &'a Catalog, build: &'a Build) -> Self {
        let mut targets = Vec::with_capacity(build.attachments.len());
        let mut missing = Vec::new();
        for reference in &build.attachments {
            match catalog.get(&reference.id) {
                Some(attachment) => targets.push(attachment),
                None => missing.push(reference.id.clone()),
            }
        }

        let final_unlock_level = targets
            .iter()
            .map(|a| a.unlock_at_weapon_level)
            .max()
            .unwrap_or(0);

        Self {
            build,
            targets,
            missing,
            final_unlock_level,
        }
    }
}

/// Selection engine bound to one weapon's catalog
#[derive(Clone, Copy)]
pub struct Selector<'a> {
    catalog: &'a Catalog,
    limits: Limits,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Selector<'a> {
    pub fn new(catalog: &'a Catalog, limits: Limits, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            catalog,
            limits,
            diagnostics,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn diagnostics(&self) -> &'a dyn Diagnostics {
        self.diagnostics
    }

    /// Level-0 loadout: every mandatory slot gets its earliest-available part
    pub fn base_loadout(&self) -> Loadout {
        let mut loadout = Loadout::new();

        for slot_id in self.catalog.mandatory_slots() {
            let all: Vec<&Attachment> = self.catalog.in_slot(slot_id).collect();
            let Some(min_unlock) = all.iter().map(|a| a.unlock_at_weapon_level).min() else {
                continue;
            };

            // min_unlock is 0 whenever the slot has a level-0 part
            let candidates = all
                .into_iter()
                .filter(|a| a.unlock_at_weapon_level == min_unlock);

            let policy = if slot_id == SCOPE_SLOT {
                MandatoryPolicy::ScopeRanked
            } else {
                MandatoryPolicy::CheapestEarliest
            };

            if let Some(chosen) = policy.pick(self.catalog, candidates) {
                loadout.equip(slot_id, &chosen.id);
            }
        }

        loadout
    }

    /// Loadout for a level below the build's final unlock level
    pub fn loadout_for_level(&self, build: &Build, level: u32) -> Loadout {
        let catalog = self.catalog;
        let unlocked: Vec<&Attachment> = catalog
            .attachments()
            .iter()
            .filter(|a| a.is_unlocked_at(level))
            .collect();

        let mut loadout = Loadout::new();

        // Seed with whatever part of the final build is already available
        for reference in &build.attachments {
            if let Some(target) = catalog.get(&reference.id) {
                if target.is_unlocked_at(level) {
                    loadout.equip(&target.slot_id, &target.id);
                }
            }
        }

        for slot_id in catalog.mandatory_slots() {
            if loadout.is_occupied(slot_id) {
                continue;
            }
            let candidates = unlocked
                .iter()
                .copied()
                .filter(|a| a.slot_id == *slot_id && !catalog.is_banned_as_filler(a));
            match MandatoryPolicy::MostPoints.pick(catalog, candidates) {
                Some(chosen) => {
                    loadout.equip(slot_id, &chosen.id);
                }
                None => self.diagnostics.mandatory_unfilled(level, slot_id),
            }
        }

        let mut fillers: Vec<&Attachment> = unlocked
            .into_iter()
            .filter(|a| !catalog.is_banned_as_filler(a))
            .collect();
        fillers.sort_by(|a, b| most_points_first(a, b));

        let budget = self.limits.max_points;
        let mut total = loadout.total_points(catalog);
        for candidate in fillers {
            if loadout.is_occupied(&candidate.slot_id) {
                continue;
            }
            if total.saturating_add(candidate.point) > budget {
                self.diagnostics
                    .filler_over_budget(level, &candidate.id, total, budget);
                continue;
            }
            loadout.equip(&candidate.slot_id, &candidate.id);
            total = total.saturating_add(candidate.point);
        }

        loadout
    }

    /// Exactly the build's resolvable targets; may exceed the budget
    pub fn exact_final_loadout(&self, build: &Build) -> Loadout {
        build
            .attachments
            .iter()
            .filter_map(|reference| self.catalog.get(&reference.id))
            .map(|a| (a.slot_id.as_str(), a.id.as_str()))
            .collect()
    }

    /// State at `level` for levels 1 and up, without compaction
    pub fn state_at(&self, resolved: &ResolvedBuild<'_>, level: u32) -> LevelState {
        let loadout = if level >= resolved.final_unlock_level {
            self.exact_final_loadout(resolved.build)
        } else {
            self.loadout_for_level(resolved.build, level)
        };
        LevelState::new(level, loadout, self.catalog)
    }
}

/// Level-0 loadout with default limits
pub fn compute_base_loadout(catalog: &Catalog) -> Loadout {
    Selector::new(catalog, Limits::default(), &TracingDiagnostics).base_loadout()
}

/// Intermediate-level state with default limits
pub fn compute_loadout_for_level(catalog: &Catalog, build: &Build, level: u32) -> LevelState {
    let loadout =
        Selector::new(catalog, Limits::default(), &TracingDiagnostics).loadout_for_level(build, level);
    LevelState::new(level, loadout, catalog)
}

/// The exact final build and its (possibly over-budget) point total
pub fn compute_exact_final_loadout(catalog: &Catalog, build: &Build) -> (Loadout, u32) {
    let loadout =
        Selector::new(catalog, Limits::default(), &TracingDiagnostics).exact_final_loadout(build);
    let total = loadout.total_points(catalog);
    (loadout, total)
}
