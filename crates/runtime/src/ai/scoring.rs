//! Target scoring.
//!
//! Every living enemy is rated on four independent 0-100 axes:
//!
//! - **hp**: how hurt it is
//! - **hit**: chance to hit it, relative to the easiest candidate
//! - **threat**: whether it can hit back, weighted by level
//! - **movement**: how cheaply the attacker can engage it
//!
//! The axes are combined with the melee or ranged weights from
//! [`AiRules`](skirmish_core::AiRules). All scoring functions are pure.

use std::cmp::Ordering;

use skirmish_core::{
    Combatant, CombatantId, Grid, HitPoints, Pathfinder, RollMode, Roster, RulesConfig,
};
use tracing::debug;

const MIN_HIT_CHANCE: f64 = 0.05;
const MAX_HIT_CHANCE: f64 = 0.95;

/// Axis scores for one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetScore {
    pub id: CombatantId,
    pub hp: f64,
    pub hit: f64,
    pub threat: f64,
    pub movement: f64,
    pub total: f64,
}

impl TargetScore {
    /// Higher total wins, then higher movement score, then lower id.
    fn rank(&self, other: &Self) -> Ordering {
        self.total
            .total_cmp(&other.total)
            .then(self.movement.total_cmp(&other.movement))
            .then(other.id.cmp(&self.id))
    }
}

/// `100 - 100 * current / base`.
pub fn hp_score(hp: HitPoints) -> f64 {
    if hp.base <= 0 {
        return 0.0;
    }
    (100.0 - 100.0 * f64::from(hp.current.max(0)) / f64::from(hp.base)).clamp(0.0, 100.0)
}

/// Chance that a d20 plus `attack_modifier` meets `armor_class`.
///
/// Natural 1s and 20s keep the single-roll chance within 5%..95%.
pub fn hit_probability(armor_class: i32, attack_modifier: i32, mode: RollMode) -> f64 {
    let needed = (armor_class - attack_modifier).max(1);
    let p = (f64::from(21 - needed) / 20.0).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE);
    match mode {
        RollMode::Normal => p,
        RollMode::Advantage => 1.0 - (1.0 - p).powi(2),
        RollMode::Disadvantage => p * p,
    }
}

/// 100 within budget, 40 within twice the budget, otherwise 0.
pub fn movement_score(cost: Option<f64>, budget: f64) -> f64 {
    match cost {
        Some(cost) if cost <= budget => 100.0,
        Some(cost) if cost <= budget * 2.0 => 40.0,
        _ => 0.0,
    }
}

/// Downed enemies are no threat. Otherwise reach counts double against level.
pub fn threat_score(actor: &Combatant, enemy: &Combatant, feet_per_cell: f64, max_level: u32) -> f64 {
    if !enemy.is_alive() {
        return 0.0;
    }
    let weapon = &enemy.main_hand;
    let reach = if weapon.reaches(enemy.position, actor.position, feet_per_cell) {
        100.0
    } else if weapon.is_ranged() {
        60.0
    } else {
        20.0
    };
    let level = 100.0 * f64::from(enemy.level) / f64::from(max_level.max(1));
    (2.0 * reach + level) / 3.0
}

/// Scores every enemy of `actor` that is not dead, in id order.
pub fn score_targets(
    actor: CombatantId,
    roster: &Roster,
    grid: &Grid,
    rules: &RulesConfig,
) -> Vec<TargetScore> {
    let Some(me) = roster.get(actor) else {
        return Vec::new();
    };
    let feet_per_cell = rules.movement.feet_per_cell();
    let weapon = &me.main_hand;
    let weights = if weapon.is_ranged() {
        rules.ai.ranged_weights
    } else {
        rules.ai.melee_weights
    };
    let budget = me.resources.move_points;
    let pathfinder = Pathfinder::new(grid, &rules.movement);

    let enemies: Vec<&Combatant> = roster
        .enemies_of(actor)
        .filter(|enemy| !enemy.status.is_dead())
        .collect();
    let max_level = enemies.iter().map(|enemy| enemy.level).max().unwrap_or(1);

    let mut scores: Vec<TargetScore> = enemies
        .iter()
        .map(|enemy| {
            let in_reach = weapon.reaches(me.position, enemy.position, feet_per_cell);
            let cover = (weapon.is_ranged() && in_reach)
                .then(|| grid.obstruction(me.position, enemy.position));
            let mode = RollMode::from_flags(
                enemy.status.is_downed(),
                cover.is_some_and(|c| c.imposes_disadvantage()),
            );
            let armor_class = enemy.armor_class() + cover.map_or(0, |c| c.cover_bonus());
            let movement = match cover {
                Some(cover) => f64::from(cover.score()),
                None if in_reach => 100.0,
                None => movement_score(
                    pathfinder
                        .approach(me.position, enemy.position, None)
                        .map(|approach| approach.cost),
                    budget,
                ),
            };
            TargetScore {
                id: enemy.id,
                hp: hp_score(enemy.hit_points),
                hit: hit_probability(armor_class, me.attack_modifier(), mode),
                threat: threat_score(me, enemy, feet_per_cell, max_level),
                movement,
                total: 0.0,
            }
        })
        .collect();

    let best_hit = scores.iter().map(|s| s.hit).fold(0.0, f64::max);
    let divisor = f64::from(rules.ai.score_divisor.max(1));
    for score in &mut scores {
        score.hit = if best_hit > 0.0 {
            100.0 * score.hit / best_hit
        } else {
            0.0
        };
        score.total = (f64::from(weights.hp) * score.hp
            + f64::from(weights.hit) * score.hit
            + f64::from(weights.threat) * score.threat
            + f64::from(weights.movement) * score.movement)
            / divisor;
        debug!(
            actor = %actor,
            target = %score.id,
            hp = score.hp,
            hit = score.hit,
            threat = score.threat,
            movement = score.movement,
            total = score.total,
            "scored target"
        );
    }
    scores
}

/// Best candidate under [`TargetScore`] ranking.
pub fn best_target(scores: &[TargetScore]) -> Option<TargetScore> {
    scores.iter().copied().max_by(TargetScore::rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{
        Ability, AbilityScores, Armor, DiceSpec, Position, Team, VitalityStatus, Weapon,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn fighter(name: &str, team: Team, at: Position) -> Combatant {
        let mut c = Combatant::new(name, 1, AbilityScores::new([16, 10, 10, 10, 10, 10]), 20)
            .with_team(team)
            .with_weapon(Weapon::new("Longsword", 5, DiceSpec::new(1, 8), Ability::Strength));
        c.position = at;
        c.resources.reset_turn(30.0);
        c
    }

    fn arena(members: Vec<Combatant>) -> (Grid, Roster) {
        let mut grid = Grid::new(12);
        let mut roster = Roster::new();
        for member in members {
            let at = member.position;
            let id = roster.add(member);
            grid.place(id, at).unwrap();
        }
        (grid, roster)
    }

    #[test]
    fn hp_axis_rises_as_target_weakens() {
        assert!(close(hp_score(HitPoints { base: 20, current: 20 }), 0.0));
        assert!(close(hp_score(HitPoints { base: 20, current: 5 }), 75.0));
        assert!(close(hp_score(HitPoints { base: 20, current: 0 }), 100.0));
    }

    #[test]
    fn hit_probability_follows_roll_mode() {
        assert!(close(hit_probability(15, 5, RollMode::Normal), 0.55));
        assert!(close(hit_probability(15, 5, RollMode::Advantage), 1.0 - 0.45 * 0.45));
        assert!(close(hit_probability(15, 5, RollMode::Disadvantage), 0.55 * 0.55));
    }

    #[test]
    fn hit_probability_is_clamped() {
        assert!(close(hit_probability(5, 10, RollMode::Normal), 0.95));
        assert!(close(hit_probability(30, 0, RollMode::Normal), 0.05));
    }

    #[test]
    fn movement_bands() {
        assert!(close(movement_score(Some(30.0), 30.0), 100.0));
        assert!(close(movement_score(Some(45.0), 30.0), 40.0));
        assert!(close(movement_score(Some(61.0), 30.0), 0.0));
        assert!(close(movement_score(None, 30.0), 0.0));
    }

    #[test]
    fn ties_prefer_movement_then_lower_id() {
        let base = TargetScore {
            id: CombatantId(4),
            hp: 0.0,
            hit: 0.0,
            threat: 0.0,
            movement: 40.0,
            total: 50.0,
        };
        let closer = TargetScore {
            id: CombatantId(7),
            movement: 100.0,
            ..base
        };
        let lower = TargetScore {
            id: CombatantId(2),
            ..base
        };
        assert_eq!(best_target(&[base, closer]).map(|s| s.id), Some(CombatantId(7)));
        assert_eq!(best_target(&[base, lower]).map(|s| s.id), Some(CombatantId(2)));
        assert_eq!(best_target(&[]), None);
    }

    #[test]
    fn wounded_enemy_outranks_healthy_one() {
        let mut hurt = fighter("Hurt", Team::Two, Position::new(3, 3));
        hurt.hit_points.current = 4;
        let (grid, roster) = arena(vec![
            fighter("Ash", Team::One, Position::new(1, 1)),
            fighter("Fresh", Team::Two, Position::new(3, 1)),
            hurt,
        ]);
        let scores = score_targets(CombatantId(0), &roster, &grid, &RulesConfig::default());
        assert_eq!(scores.len(), 2);
        assert_eq!(best_target(&scores).map(|s| s.id), Some(CombatantId(2)));
    }

    #[test]
    fn downed_enemies_are_easy_and_harmless() {
        let mut down = fighter("Down", Team::Two, Position::new(2, 1));
        down.status = VitalityStatus::Unconscious;
        down.hit_points.current = 0;
        let mut armored = fighter("Plate", Team::Two, Position::new(1, 2));
        armored.armor = Armor::new("Plate", 18, Some(0));
        let (grid, roster) = arena(vec![
            fighter("Ash", Team::One, Position::new(1, 1)),
            down,
            armored,
        ]);
        let scores = score_targets(CombatantId(0), &roster, &grid, &RulesConfig::default());
        let down = scores.iter().find(|s| s.id == CombatantId(1)).unwrap();
        let plate = scores.iter().find(|s| s.id == CombatantId(2)).unwrap();
        assert!(close(down.hit, 100.0));
        assert!(plate.hit < 100.0);
        assert!(close(down.threat, 0.0));
        assert!(plate.threat > 0.0);
    }

    #[test]
    fn dead_enemies_are_not_candidates() {
        let mut dead = fighter("Gone", Team::Two, Position::new(2, 1));
        dead.status = VitalityStatus::Dead;
        let (grid, roster) = arena(vec![fighter("Ash", Team::One, Position::new(1, 1)), dead]);
        assert!(score_targets(CombatantId(0), &roster, &grid, &RulesConfig::default()).is_empty());
    }
}
