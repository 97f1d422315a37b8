//! Per-turn blackboard.
//!
//! A [`TurnContext`] borrows the encounter's grid, roster, dice and log for
//! the length of one combatant's turn. Behavior-tree leaves read it through
//! the helpers here and act on it through the turn operations in
//! `encounter::actions`, which player commands share.

use skirmish_core::{
    Approach, CombatLog, CombatResolver, Combatant, CombatantId, Grid, Pathfinder, Position,
    RngSource, Roster, RulesConfig,
};
use crate::events::{EncounterEvent, forward_log};

pub struct TurnContext<'a> {
    /// The combatant whose turn it is.
    pub actor: CombatantId,

    /// Enemy chosen by the last `PickTarget`, if any.
    pub target: Option<CombatantId>,

    pub(crate) grid: &'a mut Grid,
    pub(crate) roster: &'a mut Roster,
    pub(crate) rng: &'a mut dyn RngSource,
    pub(crate) rules: &'a RulesConfig,
    pub(crate) log: &'a mut CombatLog,
    pub(crate) events: &'a mut Vec<EncounterEvent>,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        actor: CombatantId,
        grid: &'a mut Grid,
        roster: &'a mut Roster,
        rng: &'a mut dyn RngSource,
        rules: &'a RulesConfig,
        log: &'a mut CombatLog,
        events: &'a mut Vec<EncounterEvent>,
    ) -> Self {
        Self {
            actor,
            target: None,
            grid,
            roster,
            rng,
            rules,
            log,
            events,
        }
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn roster(&self) -> &Roster {
        &*self.roster
    }

    pub fn rules(&self) -> &RulesConfig {
        self.rules
    }

    pub fn actor(&self) -> Option<&Combatant> {
        self.roster.get(self.actor)
    }

    /// The current target, unless it has died since it was picked.
    pub fn target(&self) -> Option<&Combatant> {
        self.target
            .and_then(|id| self.roster.get(id))
            .filter(|target| !target.status.is_dead())
    }

    pub fn feet_per_cell(&self) -> f64 {
        self.rules.movement.feet_per_cell()
    }

    pub fn pathfinder(&self) -> Pathfinder<'_> {
        Pathfinder::new(&*self.grid, &self.rules.movement)
    }

    pub(crate) fn resolver(&mut self) -> CombatResolver<'_> {
        CombatResolver::new(
            &mut *self.grid,
            &mut *self.roster,
            &mut *self.rng,
            self.rules,
            &mut *self.log,
        )
    }

    /// True if the actor's main hand reaches the current target from where
    /// the actor stands.
    pub fn target_in_reach(&self) -> bool {
        let (Some(actor), Some(target)) = (self.actor(), self.target()) else {
            return false;
        };
        actor
            .main_hand
            .reaches(actor.position, target.position, self.feet_per_cell())
    }

    /// Cheapest cell adjacent to the current target, with no budget applied.
    pub fn approach_target(&self) -> Option<Approach> {
        let (actor, target) = (self.actor()?, self.target()?);
        self.pathfinder().approach(actor.position, target.position, None)
    }

    /// Cheapest free cell within `budget` feet from which a ranged weapon
    /// reaches the current target. Clearer lines of fire break cost ties.
    pub fn firing_position(&self, budget: f64) -> Option<(Position, f64)> {
        let (actor, target) = (self.actor()?, self.target()?);
        let feet_per_cell = self.feet_per_cell();
        if feet_per_cell <= 0.0 {
            return None;
        }
        let radius = (budget / feet_per_cell).floor() as i32;
        let pathfinder = self.pathfinder();
        let mut best: Option<(Position, f64, u32)> = None;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let cell = actor.position.offset(dx, dy);
                if cell != actor.position && !self.grid.is_free(cell) {
                    continue;
                }
                if !actor.main_hand.reaches(cell, target.position, feet_per_cell) {
                    continue;
                }
                let Some(cost) = pathfinder.cost_to(actor.position, cell, Some(budget)).cost() else {
                    continue;
                };
                let clear = self.grid.obstruction(cell, target.position).score();
                let better = best.is_none_or(|(_, best_cost, best_clear)| {
                    cost < best_cost || (cost == best_cost && clear > best_clear)
                });
                if better {
                    best = Some((cell, cost, clear));
                }
            }
        }
        best.map(|(cell, cost, _)| (cell, cost))
    }

    /// Feet the actor must walk to attack the current target, if that fits
    /// in `budget`.
    pub fn engage_cost(&self, budget: f64) -> Option<f64> {
        let actor = self.actor()?;
        if actor.main_hand.is_ranged() {
            self.firing_position(budget).map(|(_, cost)| cost)
        } else {
            self.approach_target()
                .map(|approach| approach.cost)
                .filter(|&cost| cost <= budget)
        }
    }

    /// Movement the actor could spend this turn, counting a dash if an
    /// action is still free.
    pub fn engage_budget(&self) -> f64 {
        self.actor().map_or(0.0, |actor| {
            let dash = if actor.resources.actions > 0 {
                self.rules.movement.speed
            } else {
                0.0
            };
            actor.resources.move_points + dash
        })
    }

    /// True if the actor could get `enemy` into melee reach within `budget`
    /// feet of movement.
    pub fn can_engage(&self, enemy: &Combatant, budget: f64) -> bool {
        let Some(actor) = self.actor() else {
            return false;
        };
        !enemy.status.is_dead()
            && (actor
                .main_hand
                .reaches(actor.position, enemy.position, self.feet_per_cell())
                || self
                    .pathfinder()
                    .approach(actor.position, enemy.position, None)
                    .is_some_and(|approach| approach.cost <= budget))
    }

    /// Forwards pending combat log lines to tracing and the event queue.
    pub fn flush_log(&mut self) {
        forward_log(&mut *self.log, &mut *self.events);
    }
}
