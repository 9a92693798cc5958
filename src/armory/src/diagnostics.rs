//! Diagnostics side channel for the selection engine
//!
//! The engine reports what it decided (or could not decide) through this
//! trait. Implementations only observe; nothing they do feeds back into
//! the computed loadouts.

use crate::loadout::LevelState;

pub trait Diagnostics {
    /// A build references attachment ids missing from the catalog
    fn unknown_attachments(&self, _build_id: &str, _attachment_ids: &[String]) {}

    /// No unlocked, non-banned candidate exists for a mandatory slot
    fn mandatory_unfilled(&self, _level: u32, _slot_id: &str) {}

    /// A filler candidate was skipped because it would exceed the budget
    fn filler_over_budget(&self, _level: u32, _attachment_id: &str, _total: u32, _budget: u32) {}

    /// A level was resolved; `retained` is false when compaction dropped it
    fn level_resolved(&self, _build_id: &str, _state: &LevelState, _retained: bool) {}
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

/// Forwards reports to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn unknown_attachments(&self, build_id: &str, attachment_ids: &[String]) {
        tracing::warn!(
            build = build_id,
            "build references unknown attachment ids: {}",
            attachment_ids.join(", ")
        );
    }

    fn mandatory_unfilled(&self, level: u32, slot_id: &str) {
        tracing::trace!(level, slot = slot_id, "no candidate for mandatory slot");
    }

    fn filler_over_budget(&self, level: u32, attachment_id: &str, total: u32, budget: u32) {
        tracing::trace!(
            level,
            attachment = attachment_id,
            total,
            budget,
            "filler skipped, over budget"
        );
    }

    fn level_resolved(&self, build_id: &str, state: &LevelState, retained: bool) {
        tracing::debug!(
            build = build_id,
            level = state.level,
            total_points = state.total_points,
            slots = state.loadout.len(),
            retained,
            "level resolved"
        );
    }
}
