//! Progression compaction
//!
//! Walks levels 0..=max_level for one build and keeps only the levels at
//! which the loadout changes. Levels 1 and max_level are always kept so
//! readers get a complete bracket.

use crate::catalog::Build;
use crate::loadout::LevelState;
use crate::select::{ResolvedBuild, Selector};

/// Compacted level states for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    pub build_id: String,
    pub final_unlock_level: u32,
    /// Strictly increasing in level, starting at level 0
    pub states: Vec<LevelState>,
}

impl Progression {
    /// Loadout in effect at `level`, holding each retained state until the next
    pub fn state_at(&self, level: u32) -> Option<&LevelState> {
        self.states.iter().take_while(|s| s.level <= level).last()
    }

    pub fn levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.states.iter().map(|s| s.level)
    }
}

/// Compute the compacted progression of `build`
pub fn compute_progression(selector: &Selector<'_>, build: &Build) -> Progression {
    let catalog = selector.catalog();
    let diagnostics = selector.diagnostics();
    let max_level = selector.limits().max_level;

    let resolved = ResolvedBuild::resolve(catalog, build);
    if !resolved.missing.is_empty() {
        diagnostics.unknown_attachments(&build.id, &resolved.missing);
    }

    let base = LevelState::new(0, selector.base_loadout(), catalog);
    diagnostics.level_resolved(&build.id, &base, true);
    let mut states = vec![base];

    for level in 1..=max_level {
        let state = selector.state_at(&resolved, level);
        let changed = states
            .last()
            .map_or(true, |previous| previous.loadout != state.loadout);
        let retained = changed || level == 1 || level == max_level;

        diagnostics.level_resolved(&build.id, &state, retained);
        if retained {
            states.push(state);
        }
    }

    Progression {
        build_id: build.id.clone(),
        final_unlock_level: resolved.final_unlock_level,
        states,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::diagnostics::{Diagnostics, NoDiagnostics};
    use crate::fixtures::{attachment, build, catalog, rifle_build, rifle_catalog};
    use crate::select::{Limits, MAX_LEVEL};
    use std::cell::RefCell;

    fn progression(catalog: &Catalog, target: &Build) -> Progression {
        let selector = Selector::new(catalog, Limits::default(), &NoDiagnostics);
        compute_progression(&selector, target)
    }

    #[test]
    fn test_levels_strictly_increase_from_zero() {
        let catalog = rifle_catalog();
        let result = progression(&catalog, &rifle_build());
        let levels: Vec<u32> = result.levels().collect();

        assert_eq!(levels.first(), Some(&0));
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_boundaries_always_present() {
        let catalog = catalog(
            &["receiver"],
            &[],
            &[],
            vec![attachment("recv-std", "receiver", 0, 0)],
        );
        let result = progression(&catalog, &build("stock", &[("recv-std", "receiver")]));
        let levels: Vec<u32> = result.levels().collect();

        // Nothing ever changes, yet 1 and 40 are materialized
        assert_eq!(levels, vec![0, 1, MAX_LEVEL]);
        assert_eq!(result.states[1].loadout, result.states[0].loadout);
    }

    #[test]
    fn test_consecutive_states_differ() {
        let catalog = rifle_catalog();
        let result = progression(&catalog, &rifle_build());
        for pair in result.states.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.level != 1 && current.level != MAX_LEVEL {
                assert_ne!(previous.loadout, current.loadout, "level {}", current.level);
            }
        }
    }

    #[test]
    fn test_replay_matches_direct_selection() {
        let catalog = rifle_catalog();
        let targets = [
            rifle_build(),
            build("budget", &[("scope-red", "scope"), ("barrel-short", "barrel")]),
            build("ghost", &[("scope-holo", "scope"), ("missing-part", "laser")]),
        ];
        let selector = Selector::new(&catalog, Limits::default(), &NoDiagnostics);

        for target in &targets {
            let result = compute_progression(&selector, target);
            let resolved = ResolvedBuild::resolve(&catalog, target);

            let replayed = result.state_at(0).unwrap();
            assert_eq!(replayed.loadout, selector.base_loadout());

            for level in 1..=MAX_LEVEL {
                let replayed = result.state_at(level).unwrap();
                let direct = selector.state_at(&resolved, level);
                assert_eq!(replayed.loadout, direct.loadout, "{} level {}", target.id, level);
                assert_eq!(replayed.total_points, direct.total_points);
            }
        }
    }

    #[test]
    fn test_final_build_from_final_unlock_level() {
        let catalog = rifle_catalog();
        let result = progression(&catalog, &rifle_build());
        assert_eq!(result.final_unlock_level, 20);

        let final_state = result.state_at(20).unwrap();
        assert_eq!(final_state.level, 20);
        assert_eq!(final_state.loadout.len(), 4);
        assert_eq!(final_state.total_points, 15 + 30 + 15 + 15);

        let last = result.states.last().unwrap();
        assert_eq!(last.level, MAX_LEVEL);
        assert_eq!(last.loadout, final_state.loadout);
    }

    #[test]
    fn test_every_level_respects_unlocks() {
        let catalog = rifle_catalog();
        let result = progression(&catalog, &rifle_build());
        for state in &result.states {
            for (_, id) in state.loadout.iter() {
                let part = catalog.get(id).unwrap();
                assert!(
                    part.unlock_at_weapon_level <= state.level || state.level == 0,
                    "{} at level {}",
                    id,
                    state.level
                );
            }
        }
    }

    #[test]
    fn test_custom_max_level() {
        let catalog = rifle_catalog();
        let limits = Limits {
            max_level: 10,
            ..Limits::default()
        };
        let selector = Selector::new(&catalog, limits, &NoDiagnostics);
        let result = compute_progression(&selector, &rifle_build());
        assert_eq!(result.states.last().map(|s| s.level), Some(10));
    }

    #[derive(Default)]
    struct UnknownRecorder(RefCell<Vec<(String, Vec<String>)>>);

    impl Diagnostics for UnknownRecorder {
        fn unknown_attachments(&self, build_id: &str, attachment_ids: &[String]) {
            self.0
                .borrow_mut()
                .push((build_id.to_string(), attachment_ids.to_vec()));
        }
    }

    #[test]
    fn test_unknown_references_reported_once() {
        let catalog = rifle_catalog();
        let recorder = UnknownRecorder::default();
        let selector = Selector::new(&catalog, Limits::default(), &recorder);
        let target = build("ghost", &[("scope-holo", "scope"), ("missing-part", "laser")]);

        let result = compute_progression(&selector, &target);
        assert_eq!(result.final_unlock_level, 6);
        assert_eq!(
            *recorder.0.borrow(),
            vec![("ghost".to_string(), vec!["missing-part".to_string()])]
        );
    }
}
