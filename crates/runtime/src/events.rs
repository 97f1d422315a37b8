//! Events emitted while an encounter runs.
//!
//! The encounter queues events as it goes; hosts pull them with
//! [`Encounter::drain_events`](crate::Encounter::drain_events) and render
//! whatever they care about. Nothing here feeds back into the rules.

use serde::{Deserialize, Serialize};
use skirmish_core::{AttackReport, CombatLog, CombatantId, Position, VitalityStatus};
use tracing::info;

use crate::encounter::EncounterResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// Initiative has been rolled and the fight is set up.
    Started { order: Vec<CombatantId> },

    RoundStarted { round: u32 },

    TurnStarted { id: CombatantId, round: u32 },

    /// A downed combatant's turn was skipped.
    TurnSkipped {
        id: CombatantId,
        status: VitalityStatus,
    },

    Moved {
        id: CombatantId,
        from: Position,
        to: Position,
        cost: f64,
    },

    Attacked(AttackReport),

    Dashed { id: CombatantId },

    Healed {
        id: CombatantId,
        amount: i32,
        status: VitalityStatus,
    },

    Passed { id: CombatantId },

    /// The combatant died and left its team.
    Died { id: CombatantId },

    /// Human-readable combat log line.
    Log(String),

    Finished(EncounterResult),
}

/// Moves pending log lines to tracing and onto the event queue.
pub(crate) fn forward_log(log: &mut CombatLog, events: &mut Vec<EncounterEvent>) {
    for line in log.drain() {
        info!(target: "combat", "{line}");
        events.push(EncounterEvent::Log(line));
    }
}
