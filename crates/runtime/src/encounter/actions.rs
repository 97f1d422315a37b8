//! Turn operations.
//!
//! These are the only ways a turn changes the encounter. Both AI leaves and
//! player commands call them, so every rule check lives in one place. A
//! rejected operation changes nothing and spends nothing.

use serde::{Deserialize, Serialize};
use skirmish_core::{
    ActionError, AttackReport, Combatant, CombatantId, DiceSpec, MoveIssue, Position, Reach,
    Resource, VitalityStatus,
};
use tracing::debug;

use crate::ai::TurnContext;
use crate::events::EncounterEvent;

/// Self-heal dice, before the level bonus.
const SECOND_WIND_DICE: DiceSpec = DiceSpec::new(1, 10);

/// What a move did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveReport {
    pub from: Position,
    /// Where the mover ended up.
    pub to: Position,
    /// Movement spent, in feet.
    pub cost: f64,
    /// Reactions provoked by leaving enemy reach, in resolution order.
    pub opportunity_attacks: Vec<AttackReport>,
    /// False when the mover went down before reaching the destination.
    pub completed: bool,
}

impl TurnContext<'_> {
    /// The actor, provided it is conscious.
    fn acting(&self) -> Result<&Combatant, ActionError> {
        let actor = self
            .actor()
            .ok_or(ActionError::UnknownCombatant(self.actor))?;
        if !actor.is_alive() {
            return Err(ActionError::Incapacitated(self.actor));
        }
        Ok(actor)
    }

    /// Cost of walking to `destination` with the movement left this turn.
    pub fn compute_move_cost(&self, destination: Position) -> Result<Reach, ActionError> {
        let actor = self.acting()?;
        Ok(self.pathfinder().cost_to(
            actor.position,
            destination,
            Some(actor.resources.move_points),
        ))
    }

    /// Walks to `destination` one cell at a time. Every step out of an
    /// enemy's reach provokes an opportunity attack.
    ///
    /// The whole path is paid for up front. A mover knocked down on the way
    /// stops on the cell it was leaving.
    pub fn move_to(&mut self, destination: Position) -> Result<MoveReport, ActionError> {
        let (from, budget) = {
            let actor = self.acting()?;
            (actor.position, actor.resources.move_points)
        };
        if !self.grid.contains(destination) {
            return Err(ActionError::illegal_move(destination, MoveIssue::OutOfBounds));
        }
        if !self.grid.is_free(destination) {
            return Err(ActionError::illegal_move(destination, MoveIssue::Occupied));
        }
        let route = self
            .pathfinder()
            .route_to(from, destination, Some(budget))
            .ok_or(ActionError::illegal_move(destination, MoveIssue::NoPath))?;
        let cost = route.cost;

        let actor = self.actor;
        self.roster
            .get_mut(actor)
            .ok_or(ActionError::UnknownCombatant(actor))?
            .resources
            .try_spend_movement(cost)?;

        let mut opportunity_attacks = Vec::new();
        let mut at = from;
        for (step_from, step_to) in route.steps() {
            let reports = self.resolver().opportunity_attacks(actor, step_from, step_to)?;
            for report in &reports {
                self.record_attack(report);
            }
            opportunity_attacks.extend(reports);
            if !self.actor().is_some_and(Combatant::is_alive) {
                break;
            }
            self.grid.relocate(step_from, step_to)?;
            if let Some(mover) = self.roster.get_mut(actor) {
                mover.position = step_to;
            }
            at = step_to;
        }

        let completed = at == destination;
        let name = self
            .actor()
            .map(|mover| mover.name.clone())
            .ok_or(ActionError::UnknownCombatant(actor))?;
        if at != from {
            self.log.push(format!("{name} moves from {from} to {at} ({cost} ft)"));
            self.events.push(EncounterEvent::Moved {
                id: actor,
                from,
                to: at,
                cost,
            });
        }
        if !completed {
            self.log.push(format!("{name} is stopped at {at}"));
        }
        self.flush_log();

        Ok(MoveReport {
            from,
            to: at,
            cost,
            opportunity_attacks,
            completed,
        })
    }

    /// One main-hand attack. The first attack of a turn takes the Attack
    /// action; extra attacks from it are used up before another action is.
    pub fn attack(&mut self, target: CombatantId) -> Result<AttackReport, ActionError> {
        let actor = self.acting()?;
        if !actor.resources.can_attack() {
            return Err(ActionError::insufficient(Resource::Attack));
        }
        let per_action = actor.attacks_per_action();

        let attacker = self.actor;
        let report = self.resolver().resolve_attack(attacker, target)?;
        self.roster
            .get_mut(attacker)
            .ok_or(ActionError::UnknownCombatant(attacker))?
            .resources
            .try_spend_attack(per_action)?;

        self.record_attack(&report);
        self.flush_log();
        Ok(report)
    }

    /// Trades the action for another turn's worth of movement.
    pub fn dash(&mut self) -> Result<(), ActionError> {
        self.acting()?;
        let speed = self.rules.movement.speed;
        let actor = self.actor;
        let combatant = self
            .roster
            .get_mut(actor)
            .ok_or(ActionError::UnknownCombatant(actor))?;
        combatant.resources.try_dash(speed)?;
        let line = format!(
            "{} dashes ({} ft of movement left)",
            combatant.name, combatant.resources.move_points
        );
        self.log.push(line);
        self.events.push(EncounterEvent::Dashed { id: actor });
        self.flush_log();
        Ok(())
    }

    /// Once per encounter, a bonus action that heals `1d10 + level`.
    /// Returns the amount rolled.
    pub fn second_wind(&mut self) -> Result<i32, ActionError> {
        let actor = self.acting()?;
        if !actor.second_wind {
            return Err(ActionError::insufficient(Resource::SecondWind));
        }
        let level = actor.level as i32;

        let id = self.actor;
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(ActionError::UnknownCombatant(id))?;
        combatant.resources.try_spend_bonus_action()?;
        combatant.second_wind = false;

        let amount = SECOND_WIND_DICE.roll(&mut *self.rng) as i32 + level;
        let name = combatant.name.clone();
        self.log.push(format!("{name} uses Second Wind"));
        let report = self.resolver().heal(id, amount)?;
        self.events.push(EncounterEvent::Healed {
            id,
            amount,
            status: report.status,
        });
        self.flush_log();
        Ok(amount)
    }

    /// Ends the turn, giving up whatever is left. Reactions are kept.
    pub fn pass_turn(&mut self) -> Result<(), ActionError> {
        let id = self.actor;
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(ActionError::UnknownCombatant(id))?;
        combatant.resources.exhaust();
        debug!(actor = %id, "turn passed");
        self.events.push(EncounterEvent::Passed { id });
        Ok(())
    }

    pub(crate) fn record_attack(&mut self, report: &AttackReport) {
        self.events.push(EncounterEvent::Attacked(report.clone()));
        if report.new_status == VitalityStatus::Dead {
            self.events.push(EncounterEvent::Died { id: report.defender });
        }
    }
}
