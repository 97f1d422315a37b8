//! The attack pipeline over borrowed encounter state.

use super::damage::{interception_reduction, reduce, roll_damage};
use super::hit::check_hit;
use super::reactions;
use super::{AttackOutcome, AttackReport, CombatLog};
use crate::combatant::{Combatant, CombatantId};
use crate::config::RulesConfig;
use crate::dice::{RngSource, RollMode};
use crate::error::ActionError;
use crate::grid::{Grid, Position};
use crate::roster::Roster;
use crate::vitality::{self, VitalityReport};

/// Resolves attacks and vitality changes against an encounter's state.
///
/// The resolver does not spend actions or attacks; the caller decides what
/// an attack costs. It does spend the reactions of anyone who reacts.
pub struct CombatResolver<'a> {
    grid: &'a mut Grid,
    roster: &'a mut Roster,
    rng: &'a mut dyn RngSource,
    rules: &'a RulesConfig,
    log: &'a mut CombatLog,
}

impl<'a> CombatResolver<'a> {
    pub fn new(
        grid: &'a mut Grid,
        roster: &'a mut Roster,
        rng: &'a mut dyn RngSource,
        rules: &'a RulesConfig,
        log: &'a mut CombatLog,
    ) -> Self {
        Self {
            grid,
            roster,
            rng,
            rules,
            log,
        }
    }

    fn combatant(&self, id: CombatantId) -> Result<&Combatant, ActionError> {
        self.roster.get(id).ok_or(ActionError::UnknownCombatant(id))
    }

    fn spend_reaction(&mut self, id: CombatantId) -> Result<(), ActionError> {
        self.roster
            .get_mut(id)
            .ok_or(ActionError::UnknownCombatant(id))?
            .resources
            .try_spend_reaction()
    }

    /// One main-hand attack from `attacker` against `defender`.
    pub fn resolve_attack(
        &mut self,
        attacker: CombatantId,
        defender: CombatantId,
    ) -> Result<AttackReport, ActionError> {
        let feet_per_cell = self.rules.movement.feet_per_cell();
        let atk = self.combatant(attacker)?;
        let def = self.combatant(defender)?;
        if !atk.is_alive() {
            return Err(ActionError::Incapacitated(attacker));
        }
        if !atk.is_enemy_of(def) {
            return Err(ActionError::invalid_target(defender, "not an enemy"));
        }
        if def.status.is_dead() {
            return Err(ActionError::invalid_target(defender, "already dead"));
        }
        if !atk.main_hand.reaches(atk.position, def.position, feet_per_cell) {
            return Err(ActionError::invalid_target(defender, "out of reach"));
        }

        let attacker_name = atk.name.clone();
        let defender_name = def.name.clone();
        let weapon = atk.main_hand.clone();
        let attack_modifier = atk.attack_modifier();
        let damage_bonus = atk.damage_bonus();
        let reroll_floor = atk.damage_reroll_floor();
        let (from, at) = (atk.position, def.position);
        let target_status = def.status;
        let mut target_ac = def.armor_class();
        let mut disadvantage = false;

        let cover = weapon.is_ranged().then(|| self.grid.obstruction(from, at));
        if let Some(cover) = cover {
            target_ac += cover.cover_bonus();
            disadvantage |= cover.imposes_disadvantage();
            if cover.cover_bonus() > 0 {
                self.log.push(format!(
                    "{defender_name} has {cover:?} cover (+{} AC)",
                    cover.cover_bonus()
                ));
            }
        }

        let protected_by = reactions::find_protector(self.roster, defender);
        if let Some(ally) = protected_by {
            self.spend_reaction(ally)?;
            disadvantage = true;
            let ally_name = self.combatant(ally)?.name.clone();
            self.log.push(format!("{ally_name} raises a shield over {defender_name}"));
        }

        let mode = RollMode::from_flags(target_status.is_downed(), disadvantage);
        let roll = self.rng.roll_d20_with(mode);
        let total = roll.natural as i32 + attack_modifier;
        let outcome = check_hit(roll.natural, total, target_ac, target_status);
        let mode_note = match mode {
            RollMode::Normal => "",
            RollMode::Advantage => " with advantage",
            RollMode::Disadvantage => " with disadvantage",
        };
        self.log.push(format!(
            "{attacker_name} attacks {defender_name} with {}{mode_note}: {roll} + {attack_modifier} = {total} vs AC {target_ac}",
            weapon.name
        ));

        let mut damage = 0;
        let mut intercepted_by = None;
        let new_status = match outcome {
            AttackOutcome::Miss => {
                self.log.push(format!("{attacker_name} misses {defender_name}"));
                target_status
            }
            AttackOutcome::Hit | AttackOutcome::Critical => {
                let critical = outcome.is_critical();
                let rolled = roll_damage(weapon.damage, critical, damage_bonus, reroll_floor, &mut *self.rng);
                damage = rolled.total;
                if critical {
                    self.log.push("Critical hit!");
                }
                self.log.push(format!(
                    "{attacker_name} hits {defender_name} for {damage} ({}: {} + {})",
                    rolled.dice, rolled.rolled, rolled.bonus
                ));

                if damage > 0
                    && let Some(ally) = reactions::find_interceptor(self.roster, defender)
                {
                    self.spend_reaction(ally)?;
                    let proficiency = self.combatant(ally)?.proficiency_bonus();
                    let soak = interception_reduction(proficiency, &mut *self.rng);
                    let reduced = reduce(damage, soak);
                    intercepted_by = Some((ally, damage - reduced));
                    let ally_name = self.combatant(ally)?.name.clone();
                    self.log.push(format!(
                        "{ally_name} intercepts {} damage meant for {defender_name}",
                        damage - reduced
                    ));
                    damage = reduced;
                }

                self.vitality_check(defender, damage, critical)?.status
            }
        };

        Ok(AttackReport {
            attacker,
            defender,
            outcome,
            roll,
            total,
            target_ac,
            damage,
            new_status,
            cover,
            protected_by,
            intercepted_by,
        })
    }

    /// Applies `incoming_damage` and re-runs the vitality rules.
    ///
    /// With zero damage this is the start-of-turn check that rolls death
    /// saves for the unconscious. A combatant that dies leaves its team and
    /// its cell immediately.
    pub fn vitality_check(
        &mut self,
        id: CombatantId,
        incoming_damage: i32,
        was_critical: bool,
    ) -> Result<VitalityReport, ActionError> {
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(ActionError::UnknownCombatant(id))?;
        let report = vitality::apply_damage(
            combatant,
            incoming_damage,
            was_critical,
            &self.rules.death_saves,
            &mut *self.rng,
        );
        let name = combatant.name.clone();
        let position = combatant.position;
        let saves = combatant.death_saves;

        if let Some(face) = report.death_save {
            self.log.push(format!(
                "{name} rolls a death save: {face} ({} successes, {} failures)",
                saves.successes, saves.failures
            ));
        }
        if report.changed() {
            self.log.push(format!("{name} is now {}", report.status));
        }
        if report.died() {
            self.roster.remove_from_team(id);
            self.grid.vacate(position);
        }
        Ok(report)
    }

    /// Restores hit points, reviving a downed combatant.
    pub fn heal(&mut self, id: CombatantId, amount: i32) -> Result<VitalityReport, ActionError> {
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(ActionError::UnknownCombatant(id))?;
        let report = vitality::heal(combatant, amount);
        let hp = combatant.hit_points;
        self.log.push(format!(
            "{} recovers {amount} hp ({}/{})",
            combatant.name, hp.current, hp.base
        ));
        if report.changed() {
            self.log.push(format!("{} is now {}", combatant.name, report.status));
        }
        Ok(report)
    }

    /// Opportunity attacks against `mover` for stepping from `from` to `to`.
    ///
    /// Every enemy whose melee reach covers `from` but not `to`, and who still
    /// has a reaction, attacks once. `mover` must still be standing on
    /// `from`. Stops early if the mover goes down.
    pub fn opportunity_attacks(
        &mut self,
        mover: CombatantId,
        from: Position,
        to: Position,
    ) -> Result<Vec<AttackReport>, ActionError> {
        let feet_per_cell = self.rules.movement.feet_per_cell();
        let attackers = reactions::opportunity_attackers(self.roster, mover, from, to, feet_per_cell);
        let mut reports = Vec::with_capacity(attackers.len());
        for enemy in attackers {
            if !self.combatant(mover)?.is_alive() {
                break;
            }
            self.spend_reaction(enemy)?;
            let enemy_name = self.combatant(enemy)?.name.clone();
            let mover_name = self.combatant(mover)?.name.clone();
            self.log.push(format!(
                "{enemy_name} takes an opportunity attack as {mover_name} moves away"
            ));
            reports.push(self.resolve_attack(enemy, mover)?);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{
        Ability, AbilityScores, Armor, FightingStyle, OffHand, Team, VitalityStatus, Weapon,
    };
    use crate::dice::{DiceSpec, ScriptedRng};
    use crate::grid::{Obstruction, Terrain};

    struct Arena {
        grid: Grid,
        roster: Roster,
        rules: RulesConfig,
        log: CombatLog,
    }

    impl Arena {
        fn new() -> Self {
            Self {
                grid: Grid::new(10),
                roster: Roster::new(),
                rules: RulesConfig::default(),
                log: CombatLog::new(),
            }
        }

        fn put(&mut self, mut combatant: Combatant, position: Position) -> CombatantId {
            combatant.position = position;
            combatant.resources.reset_turn(30.0);
            combatant.resources.reset_round();
            let id = self.roster.add(combatant);
            self.grid.place(id, position).unwrap();
            id
        }

        fn resolver<'a>(&'a mut self, rng: &'a mut ScriptedRng) -> CombatResolver<'a> {
            CombatResolver::new(&mut self.grid, &mut self.roster, rng, &self.rules, &mut self.log)
        }
    }

    fn swordsman(name: &str, team: Team) -> Combatant {
        let sword = Weapon::new("Longsword", 5, DiceSpec::new(1, 8), Ability::Strength);
        // STR 16: +3, level 1: +2 proficiency
        Combatant::new(name, 1, AbilityScores::new([16, 10, 10, 10, 10, 10]), 20)
            .with_team(team)
            .with_weapon(sword)
    }

    fn duel() -> (Arena, CombatantId, CombatantId) {
        let mut arena = Arena::new();
        let ash = arena.put(swordsman("Ash", Team::One), Position::new(2, 2));
        let bryn = arena.put(swordsman("Bryn", Team::Two), Position::new(3, 2));
        (arena, ash, bryn)
    }

    #[test]
    fn natural_one_misses_despite_huge_bonus() {
        let mut arena = Arena::new();
        let mut giant = swordsman("Giant", Team::One);
        giant.scores.set(Ability::Strength, 106);
        giant.rederive_modifiers();
        let giant = arena.put(giant, Position::new(2, 2));
        let mut target = swordsman("Rag", Team::Two);
        target.armor = Armor::new("Rags", 5, None);
        let target = arena.put(target, Position::new(3, 2));

        let mut rng = ScriptedRng::new([1]);
        let report = arena.resolver(&mut rng).resolve_attack(giant, target).unwrap();
        assert_eq!(report.total, 51);
        assert_eq!(report.outcome, AttackOutcome::Miss);
        assert_eq!(report.damage, 0);
    }

    #[test]
    fn natural_twenty_doubles_damage_dice() {
        let (mut arena, ash, bryn) = duel();
        let mut rng = ScriptedRng::new([20, 4, 6]);
        let report = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap();
        assert!(report.critical());
        assert_eq!(report.damage, 13);
        assert_eq!(arena.roster.get(bryn).unwrap().hit_points.current, 7);
        assert!(arena.log.lines().iter().any(|l| l == "Critical hit!"));
    }

    #[test]
    fn downed_target_gives_advantage_and_critical() {
        let (mut arena, ash, bryn) = duel();
        {
            let target = arena.roster.get_mut(bryn).unwrap();
            target.status = VitalityStatus::Unconscious;
            target.hit_points.current = 0;
        }
        let mut rng = ScriptedRng::new([5, 14, 3, 3]);
        let report = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap();
        assert_eq!(report.roll.natural, 14);
        assert_eq!(report.roll.discarded, Some(5));
        assert!(report.critical());
        assert_eq!(report.new_status, VitalityStatus::Unconscious);
        assert_eq!(arena.roster.get(bryn).unwrap().death_saves.failures, 2);
    }

    #[test]
    fn killing_blow_removes_from_team_and_grid() {
        let (mut arena, ash, bryn) = duel();
        {
            let target = arena.roster.get_mut(bryn).unwrap();
            target.hit_points = crate::combatant::HitPoints { base: 10, current: 3 };
        }
        let mut rng = ScriptedRng::new([15, 8]);
        let report = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap();
        assert_eq!(report.damage, 11);
        assert_eq!(report.new_status, VitalityStatus::Dead);
        assert!(arena.roster.is_eliminated(Team::Two));
        assert!(arena.grid.is_free(Position::new(3, 2)));
        assert!(arena.roster.get(bryn).is_some());
    }

    #[test]
    fn rejects_allies_dead_and_distant_targets() {
        let (mut arena, ash, bryn) = duel();
        let friend = arena.put(swordsman("Cole", Team::One), Position::new(2, 3));
        let mut rng = ScriptedRng::default();

        let err = arena.resolver(&mut rng).resolve_attack(ash, friend).unwrap_err();
        assert_eq!(err, ActionError::invalid_target(friend, "not an enemy"));

        let far = arena.put(swordsman("Dara", Team::Two), Position::new(8, 8));
        let err = arena.resolver(&mut rng).resolve_attack(ash, far).unwrap_err();
        assert_eq!(err, ActionError::invalid_target(far, "out of reach"));

        arena.roster.get_mut(bryn).unwrap().status = VitalityStatus::Dead;
        let err = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap_err();
        assert_eq!(err, ActionError::invalid_target(bryn, "already dead"));
        assert!(arena.log.is_empty());
    }

    #[test]
    fn protection_imposes_disadvantage_once() {
        let (mut arena, ash, bryn) = duel();
        let guard = swordsman("Cade", Team::Two)
            .with_style(FightingStyle::Protection)
            .with_off_hand(OffHand::Shield { ac_bonus: 2 });
        let cade = arena.put(guard, Position::new(4, 2));

        let mut rng = ScriptedRng::new([18, 3]);
        let report = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap();
        assert_eq!(report.protected_by, Some(cade));
        assert_eq!(report.roll.natural, 3);
        assert_eq!(report.outcome, AttackOutcome::Miss);
        assert_eq!(arena.roster.get(cade).unwrap().resources.reactions, 0);

        let mut rng = ScriptedRng::new([18, 3]);
        let report = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap();
        assert_eq!(report.protected_by, None);
        assert_eq!(report.roll.natural, 18);
    }

    #[test]
    fn interception_soaks_damage() {
        let (mut arena, ash, bryn) = duel();
        let cade = arena.put(
            swordsman("Cade", Team::Two).with_style(FightingStyle::Interception),
            Position::new(3, 3),
        );
        // hit on 15, 1d8 = 8 (+3), interception 1d10 = 4 (+2)
        let mut rng = ScriptedRng::new([15, 8, 4]);
        let report = arena.resolver(&mut rng).resolve_attack(ash, bryn).unwrap();
        assert_eq!(report.intercepted_by, Some((cade, 6)));
        assert_eq!(report.damage, 5);
        assert_eq!(arena.roster.get(bryn).unwrap().hit_points.current, 15);
    }

    #[test]
    fn leaving_reach_provokes_but_sidestepping_does_not() {
        let (mut arena, ash, bryn) = duel();
        let mut rng = ScriptedRng::new([15, 5]);
        let reports = arena
            .resolver(&mut rng)
            .opportunity_attacks(bryn, Position::new(3, 2), Position::new(3, 3))
            .unwrap();
        assert!(reports.is_empty());

        let reports = arena
            .resolver(&mut rng)
            .opportunity_attacks(bryn, Position::new(3, 2), Position::new(5, 2))
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].attacker, ash);
        assert_eq!(reports[0].damage, 8);
        assert_eq!(arena.roster.get(ash).unwrap().resources.reactions, 0);

        // reaction spent: a second departure is free
        let reports = arena
            .resolver(&mut rng)
            .opportunity_attacks(bryn, Position::new(3, 2), Position::new(5, 2))
            .unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn ranged_attacks_respect_cover() {
        let mut arena = Arena::new();
        let bow = Weapon::new("Longbow", 80, DiceSpec::new(1, 8), Ability::Dexterity);
        let archer = arena.put(
            Combatant::new("Ilse", 1, AbilityScores::average(), 12)
                .with_team(Team::One)
                .with_weapon(bow),
            Position::new(0, 0),
        );
        let target = arena.put(swordsman("Jory", Team::Two), Position::new(5, 0));
        arena.put(swordsman("Kel", Team::Two), Position::new(3, 0));
        arena.grid.set_terrain(Position::new(2, 0), Terrain::Forest);

        let mut rng = ScriptedRng::new([10]);
        let report = arena.resolver(&mut rng).resolve_attack(archer, target).unwrap();
        assert_eq!(report.cover, Some(Obstruction::Moderate));
        assert_eq!(report.target_ac, 15);
        assert_eq!(report.total, 12);
        assert_eq!(report.outcome, AttackOutcome::Miss);
    }

    #[test]
    fn start_of_turn_check_rolls_death_save() {
        let (mut arena, _ash, bryn) = duel();
        {
            let target = arena.roster.get_mut(bryn).unwrap();
            target.status = VitalityStatus::Unconscious;
            target.hit_points.current = 0;
        }
        let mut rng = ScriptedRng::new([20]);
        let report = arena.resolver(&mut rng).vitality_check(bryn, 0, false).unwrap();
        assert_eq!(report.death_save, Some(20));
        assert_eq!(report.status, VitalityStatus::Alive);
        assert_eq!(arena.roster.get(bryn).unwrap().hit_points.current, 1);
    }
}
