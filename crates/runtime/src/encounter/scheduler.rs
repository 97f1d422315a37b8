//! Round loop and turn hand-off.
//!
//! ```text
//! RoundStart (reset reactions)
//!   -> for each combatant in initiative order:
//!        dead          -> skipped silently
//!        downed        -> status re-check (may roll a death save), then
//!                         skipped unless it came back up
//!        alive         -> fresh resources, becomes active
//! RoundEnd -> next RoundStart, or a draw past `max_rounds`
//! ```
//!
//! Elimination is checked before every hand-off, so a fight ends in the
//! same round the last enemy falls.

use skirmish_core::{RngSource, Team};
use tracing::info;

use super::{Encounter, EncounterResult, TurnAdvance};
use crate::error::{EncounterError, Result};
use crate::events::EncounterEvent;

impl<R: RngSource> Encounter<R> {
    /// Ends the current turn and hands the next one out.
    pub fn advance_turn(&mut self) -> Result<TurnAdvance> {
        self.active = None;
        loop {
            if let Some(result) = self.result {
                return Ok(TurnAdvance::Finished(result));
            }
            if let Some(result) = self.elimination() {
                return Ok(TurnAdvance::Finished(self.finish(result)));
            }

            if self.cursor >= self.order.len() {
                if self.round >= self.rules.max_rounds {
                    let result = EncounterResult::Draw { rounds: self.round };
                    return Ok(TurnAdvance::Finished(self.finish(result)));
                }
                self.start_round();
            }

            let id = self.order[self.cursor];
            self.cursor += 1;
            let status = self
                .roster
                .get(id)
                .ok_or_else(|| {
                    EncounterError::corrupt(format!("{id} is in the turn order but not the roster"))
                })?
                .status;
            if status.is_dead() {
                continue;
            }

            let status = self.vitality_check(id, 0, false)?;
            if !status.can_act() {
                self.events.push(EncounterEvent::TurnSkipped { id, status });
                continue;
            }

            let speed = self.rules.movement.speed;
            let combatant = self
                .roster
                .get_mut(id)
                .ok_or_else(|| EncounterError::corrupt(format!("{id} vanished from the roster")))?;
            combatant.begin_turn(speed);
            let control = combatant.control;
            info!(round = self.round, name = %combatant.name, %id, "turn started");

            self.active = Some(id);
            self.events.push(EncounterEvent::TurnStarted {
                id,
                round: self.round,
            });
            return Ok(TurnAdvance::Active {
                id,
                control,
                round: self.round,
            });
        }
    }

    fn start_round(&mut self) {
        self.round += 1;
        self.cursor = 0;
        for combatant in self.roster.iter_mut() {
            combatant.resources.reset_round();
        }
        info!(round = self.round, "round started");
        self.events.push(EncounterEvent::RoundStarted { round: self.round });
    }

    fn elimination(&self) -> Option<EncounterResult> {
        let winner = match (
            self.roster.is_eliminated(Team::One),
            self.roster.is_eliminated(Team::Two),
        ) {
            (false, false) => return None,
            (true, false) => Team::Two,
            (false, true) => Team::One,
            // Nobody left on either side.
            (true, true) => return Some(EncounterResult::Draw { rounds: self.round }),
        };
        Some(EncounterResult::Victory {
            winner,
            rounds: self.round,
        })
    }

    /// Records the outcome once, tallying every member of both teams.
    fn finish(&mut self, result: EncounterResult) -> EncounterResult {
        if let Some(done) = self.result {
            return done;
        }
        for combatant in self.roster.iter_mut() {
            let record = &mut combatant.record;
            record.games += 1;
            match result.winner() {
                Some(winner) if combatant.team == winner => record.wins += 1,
                Some(_) => record.defeats += 1,
                None => {}
            }
        }
        info!(?result, "encounter finished");
        self.result = Some(result);
        self.active = None;
        self.events.push(EncounterEvent::Finished(result));
        result
    }
}
