//! Day-advance reducer.
//!
//! Folds one [`SimulationResult`] into the registry and history without side
//! effects. Merge policy:
//!
//! - relationship deltas from the same source apply in batch order, each one
//!   saturating before the next is added
//! - deltas toward unknown characters, or toward the source itself, are ignored
//! - the *first* status update and the *first* role update naming a character
//!   win; later ones for the same character are ignored
//! - a role update also sets the employment flag verbatim

use std::collections::HashSet;

use crate::ids::IdGenerator;
use crate::relationship::saturating_apply;
use crate::types::{Character, LogEntry, SimulationResult, SimulationState};

/// What one day-advance produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOutcome {
    /// Day counter after the advance
    pub day: u32,
    pub characters: Vec<Character>,
    /// Entries to append to the history, tagged with the day they narrate
    pub new_logs: Vec<LogEntry>,
}

/// Reduces one day. The day counter moves by exactly one, except at
/// `u32::MAX` where it stays put and a warning is logged.
pub fn reduce_day(
    day: u32,
    characters: &[Character],
    result: &SimulationResult,
    ids: &mut dyn IdGenerator,
) -> DayOutcome {
    let new_logs = result
        .logs
        .iter()
        .map(|log| LogEntry::new(ids.next_id(), day, log.text.clone(), log.kind))
        .collect();

    let known: HashSet<&str> = characters.iter().map(|c| c.id.as_str()).collect();
    let characters = characters
        .iter()
        .map(|character| advance_character(character, result, &known))
        .collect();

    let next_day = day.checked_add(1).unwrap_or_else(|| {
        log::warn!("Day counter is at its limit ({}); it will not advance further", day);
        day
    });

    DayOutcome {
        day: next_day,
        characters,
        new_logs,
    }
}

fn advance_character(
    character: &Character,
    result: &SimulationResult,
    known: &HashSet<&str>,
) -> Character {
    let mut next = character.clone();

    for update in result
        .relationship_updates
        .iter()
        .filter(|u| u.source_id == character.id)
    {
        if update.target_id == character.id || !known.contains(update.target_id.as_str()) {
            log::debug!(
                "Ignoring relationship update {} -> {}: unknown target",
                update.source_id,
                update.target_id
            );
            continue;
        }
        let current = next.affinity_toward(&update.target_id);
        next.relationships
            .insert(update.target_id.clone(), saturating_apply(current, update.amount));
    }

    if let Some(update) = result
        .status_updates
        .iter()
        .find(|u| u.character_id == character.id)
    {
        next.status = update.new_status.clone();
    }

    if let Some(update) = result
        .role_updates
        .iter()
        .find(|u| u.character_id == character.id)
    {
        next.role = update.new_role.clone();
        next.is_employed = update.is_employed;
    }

    next
}

impl SimulationState {
    /// Applies one day's result, returning the next state.
    pub fn advanced(&self, result: &SimulationResult, ids: &mut dyn IdGenerator) -> Self {
        let outcome = reduce_day(self.day, &self.characters, result, ids);
        let mut logs = self.logs.clone();
        logs.extend(outcome.new_logs);

        Self {
            day: outcome.day,
            characters: outcome.characters,
            logs,
        }
    }
}
