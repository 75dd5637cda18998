//! Per-Sim pronoun preference lookup.

use std::collections::HashMap;

/// Read-only view of the pronoun preferences the player configured per Sim.
///
/// The selection is a pronoun-set id, `"0"` (always use the female-side text), `"1"`
/// (always use the male-side text), or empty for "leave this Sim's wording alone". The
/// fallback plays the same role when a selected set has no entry for a pair.
///
/// Persistence of these values belongs to the caller; resolution only reads a snapshot.
pub trait PreferenceStore {
    /// The pronoun-set selection for a Sim; empty when the Sim uses the default wording.
    fn set_selection(&self, sim_id: u64) -> String;

    /// The fallback selector for a Sim, consulted when a pair has no replacement.
    fn fallback(&self, sim_id: u64) -> String;
}

/// An in-memory [`PreferenceStore`], used by tests and the command line tools.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferences {
    selections: HashMap<u64, String>,
    fallbacks: HashMap<u64, String>,
}

impl MemoryPreferences {
    pub fn new() -> MemoryPreferences {
        MemoryPreferences::default()
    }

    /// Set a Sim's pronoun-set selection.
    pub fn select(&mut self, sim_id: u64, selection: &str) {
        self.selections.insert(sim_id, selection.to_owned());
    }

    /// Set a Sim's fallback selector.
    pub fn set_fallback(&mut self, sim_id: u64, fallback: &str) {
        self.fallbacks.insert(sim_id, fallback.to_owned());
    }
}

impl PreferenceStore for MemoryPreferences {
    fn set_selection(&self, sim_id: u64) -> String {
        self.selections.get(&sim_id).cloned().unwrap_or_default()
    }

    fn fallback(&self, sim_id: u64) -> String {
        self.fallbacks.get(&sim_id).cloned().unwrap_or_default()
    }
}
