//! The encounter: owned state plus the public engine API.
//!
//! [`Encounter`] owns the grid, roster, dice and event queue. The scheduler
//! hands out turns with [`Encounter::advance_turn`]; the active combatant is
//! then driven either by [`Encounter::run_ai_turn`] or by player commands
//! ([`Encounter::move_to`], [`Encounter::attack`], ...). Every command runs
//! through a [`TurnContext`] built over disjoint borrows of the owned state.

mod actions;
mod scheduler;
mod setup;

pub use actions::MoveReport;
pub use setup::{EncounterBuilder, MIN_GRID_SIZE, start_encounter};

use serde::{Deserialize, Serialize};
use skirmish_core::{
    ActionError, Approach, AttackReport, CombatLog, Combatant, CombatantId, Control, Grid,
    Pathfinder, PcgRng, Position, Reach, RngSource, Roster, RulesConfig, Team, VitalityStatus,
};
use tracing::warn;

use crate::ai::{self, BehaviorProfile, TurnContext};
use crate::error::{EncounterError, Result};
use crate::events::EncounterEvent;

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterResult {
    Victory { winner: Team, rounds: u32 },
    /// The round limit ran out with both teams standing.
    Draw { rounds: u32 },
}

impl EncounterResult {
    pub fn winner(&self) -> Option<Team> {
        match self {
            Self::Victory { winner, .. } => Some(*winner),
            Self::Draw { .. } => None,
        }
    }

    pub fn rounds(&self) -> u32 {
        match self {
            Self::Victory { rounds, .. } | Self::Draw { rounds } => *rounds,
        }
    }
}

/// Outcome of [`Encounter::advance_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAdvance {
    /// `id` now holds the turn and has fresh resources.
    Active {
        id: CombatantId,
        control: Control,
        round: u32,
    },
    Finished(EncounterResult),
}

pub struct Encounter<R: RngSource = PcgRng> {
    rules: RulesConfig,
    grid: Grid,
    roster: Roster,
    rng: R,
    log: CombatLog,
    events: Vec<EncounterEvent>,

    order: Vec<CombatantId>,
    /// Index into `order` of the next combatant to act.
    cursor: usize,
    round: u32,
    active: Option<CombatantId>,
    result: Option<EncounterResult>,
}

impl<R: RngSource> Encounter<R> {
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    /// Rounds started so far; 0 before the first [`advance_turn`](Self::advance_turn).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Everyone in turn order, highest initiative first.
    pub fn initiative_order(&self) -> &[CombatantId] {
        &self.order
    }

    pub fn active(&self) -> Option<CombatantId> {
        self.active
    }

    pub fn result(&self) -> Option<EncounterResult> {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Text board with combatants drawn by team (`A`/`B`), lower case when
    /// downed.
    pub fn render(&self) -> String {
        self.grid.render(|id| match self.roster.get(id) {
            Some(c) => {
                let glyph = match c.team {
                    Team::One => 'A',
                    Team::Two => 'B',
                };
                if c.is_alive() { glyph } else { glyph.to_ascii_lowercase() }
            }
            None => '?',
        })
    }

    fn context(&mut self, actor: CombatantId) -> TurnContext<'_> {
        TurnContext::new(
            actor,
            &mut self.grid,
            &mut self.roster,
            &mut self.rng,
            &self.rules,
            &mut self.log,
            &mut self.events,
        )
    }

    fn ensure_active(&self, id: CombatantId) -> Result<()> {
        if self.is_finished() {
            return Err(EncounterError::Finished);
        }
        if self.active != Some(id) {
            return Err(EncounterError::NotActive {
                id,
                active: self.active,
            });
        }
        Ok(())
    }

    /// Runs `op` as `id`'s turn and logs rejections.
    fn command<T>(
        &mut self,
        id: CombatantId,
        op: impl FnOnce(&mut TurnContext<'_>) -> std::result::Result<T, ActionError>,
    ) -> Result<T> {
        self.ensure_active(id)?;
        let result = op(&mut self.context(id));
        if let Err(err) = &result {
            warn!(actor = %id, %err, "command rejected");
        }
        Ok(result?)
    }

    /// Movement cost from `id`'s cell to `destination` within its remaining
    /// movement. Read-only; usable outside the combatant's turn.
    pub fn compute_move_cost(&self, id: CombatantId, destination: Position) -> Result<Reach> {
        let combatant = self
            .roster
            .get(id)
            .ok_or(ActionError::UnknownCombatant(id))?;
        Ok(Pathfinder::new(&self.grid, &self.rules.movement).cost_to(
            combatant.position,
            destination,
            Some(combatant.resources.move_points),
        ))
    }

    /// Cheapest free cell next to `target`, or the furthest affordable cell
    /// toward it when `budget` falls short.
    pub fn find_adjacent_approach(
        &self,
        id: CombatantId,
        target: Position,
        budget: Option<f64>,
    ) -> Result<Option<Approach>> {
        let combatant = self
            .roster
            .get(id)
            .ok_or(ActionError::UnknownCombatant(id))?;
        Ok(Pathfinder::new(&self.grid, &self.rules.movement)
            .approach(combatant.position, target, budget))
    }

    /// One raw attack, outside the action economy.
    pub fn resolve_attack(&mut self, attacker: CombatantId, defender: CombatantId) -> Result<AttackReport> {
        if self.is_finished() {
            return Err(EncounterError::Finished);
        }
        let mut ctx = self.context(attacker);
        let report = ctx.resolver().resolve_attack(attacker, defender)?;
        ctx.record_attack(&report);
        ctx.flush_log();
        Ok(report)
    }

    /// Applies damage (or, with zero, the start-of-turn check) to `id`.
    pub fn vitality_check(
        &mut self,
        id: CombatantId,
        incoming_damage: i32,
        was_critical: bool,
    ) -> Result<VitalityStatus> {
        if self.is_finished() {
            return Err(EncounterError::Finished);
        }
        let mut ctx = self.context(id);
        let report = ctx
            .resolver()
            .vitality_check(id, incoming_damage, was_critical)?;
        if report.died() {
            ctx.events.push(EncounterEvent::Died { id });
        }
        ctx.flush_log();
        Ok(report.status)
    }

    /// Lets the AI play `id`'s turn to the end.
    pub fn run_ai_turn(&mut self, id: CombatantId) -> Result<BehaviorProfile> {
        self.ensure_active(id)?;
        Ok(ai::play_turn(&mut self.context(id)))
    }

    pub fn move_to(&mut self, id: CombatantId, destination: Position) -> Result<MoveReport> {
        self.command(id, |ctx| ctx.move_to(destination))
    }

    pub fn attack(&mut self, id: CombatantId, target: CombatantId) -> Result<AttackReport> {
        self.command(id, |ctx| ctx.attack(target))
    }

    pub fn dash(&mut self, id: CombatantId) -> Result<()> {
        self.command(id, |ctx| ctx.dash())
    }

    /// Returns the hit points rolled.
    pub fn second_wind(&mut self, id: CombatantId) -> Result<i32> {
        self.command(id, |ctx| ctx.second_wind())
    }

    pub fn pass_turn(&mut self, id: CombatantId) -> Result<()> {
        self.command(id, |ctx| ctx.pass_turn())
    }

    /// Plays turns until the encounter ends, letting the AI decide for
    /// everyone regardless of [`Control`].
    pub fn run_to_completion(&mut self) -> Result<EncounterResult> {
        loop {
            match self.advance_turn()? {
                TurnAdvance::Active { id, .. } => {
                    self.run_ai_turn(id)?;
                }
                TurnAdvance::Finished(result) => return Ok(result),
            }
        }
    }
}
