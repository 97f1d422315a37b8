//! Life and death state machine.
//!
//! Every damage event and every downed combatant's turn goes through
//! [`check_status`]. Rules are applied in a fixed precedence order:
//!
//! 1. Stabilized, no damage: stays stabilized.
//! 2. Stabilized, critical damage: unconscious with two failures.
//! 3. Positive hp and alive: stays alive.
//! 4. Damage of at least base hp: dead outright.
//! 5. Out of hp while alive: unconscious.
//! 6. Stabilized, ordinary damage: unconscious with one failure.
//! 7. Critical damage while unconscious: two failures, no roll.
//! 8. Out of hp while unconscious: death save (20 revives at 1 hp,
//!    threshold or better succeeds, 1 fails twice, anything else fails once).
//! 9. Enough failures: dead. Enough successes: stabilized. Counters reset.

use crate::combatant::{Combatant, VitalityStatus};
use crate::config::DeathSaveRules;
use crate::dice::RngSource;

/// What a vitality check did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalityReport {
    pub previous: VitalityStatus,
    pub status: VitalityStatus,
    /// Natural d20 of the death save, if one was rolled.
    pub death_save: Option<u32>,
}

impl VitalityReport {
    fn unchanged(status: VitalityStatus) -> Self {
        Self {
            previous: status,
            status,
            death_save: None,
        }
    }

    pub fn changed(&self) -> bool {
        self.previous != self.status
    }

    pub fn died(&self) -> bool {
        self.status.is_dead() && !self.previous.is_dead()
    }
}

/// Subtracts `damage` (floored at zero, hp floored at zero) and runs
/// [`check_status`].
pub fn apply_damage(
    combatant: &mut Combatant,
    damage: i32,
    critical: bool,
    rules: &DeathSaveRules,
    rng: &mut (impl RngSource + ?Sized),
) -> VitalityReport {
    if combatant.status.is_dead() {
        return VitalityReport::unchanged(combatant.status);
    }
    let damage = damage.max(0);
    let hp = &mut combatant.hit_points;
    hp.current = (hp.current - damage).max(0);
    check_status(combatant, damage, critical, rules, rng)
}

/// Re-evaluates vitality after `damage` has already been subtracted.
///
/// Called with zero damage at the start of a downed combatant's turn, which
/// is where death saves get rolled.
pub fn check_status(
    combatant: &mut Combatant,
    damage: i32,
    critical: bool,
    rules: &DeathSaveRules,
    rng: &mut (impl RngSource + ?Sized),
) -> VitalityReport {
    let previous = combatant.status;
    let mut death_save = None;
    let hp = combatant.hit_points;
    let saves = &mut combatant.death_saves;

    let status = match previous {
        VitalityStatus::Dead => VitalityStatus::Dead,
        VitalityStatus::Stabilized if damage == 0 => VitalityStatus::Stabilized,
        VitalityStatus::Stabilized if critical => {
            saves.failures += 2;
            VitalityStatus::Unconscious
        }
        VitalityStatus::Alive if hp.current > 0 => VitalityStatus::Alive,
        _ if damage >= hp.base => {
            saves.reset();
            VitalityStatus::Dead
        }
        VitalityStatus::Alive => VitalityStatus::Unconscious,
        VitalityStatus::Stabilized => {
            saves.failures += 1;
            VitalityStatus::Unconscious
        }
        VitalityStatus::Unconscious if critical => {
            saves.failures += 2;
            VitalityStatus::Unconscious
        }
        VitalityStatus::Unconscious if hp.current <= 0 => {
            let roll = rng.roll_d20();
            death_save = Some(roll);
            if roll == 20 {
                saves.reset();
                combatant.hit_points.current = 1;
                VitalityStatus::Alive
            } else {
                if roll >= rules.success_threshold {
                    saves.successes += 1;
                } else if roll == 1 {
                    saves.failures += 2;
                } else {
                    saves.failures += 1;
                }
                VitalityStatus::Unconscious
            }
        }
        VitalityStatus::Unconscious => VitalityStatus::Unconscious,
    };

    let status = settle(combatant, status, rules);
    combatant.status = status;
    VitalityReport {
        previous,
        status,
        death_save,
    }
}

/// Turns accumulated death saves into a final state.
fn settle(
    combatant: &mut Combatant,
    status: VitalityStatus,
    rules: &DeathSaveRules,
) -> VitalityStatus {
    if status != VitalityStatus::Unconscious {
        return status;
    }
    let saves = &mut combatant.death_saves;
    if saves.failures >= rules.limit {
        saves.reset();
        VitalityStatus::Dead
    } else if saves.successes >= rules.limit {
        saves.reset();
        VitalityStatus::Stabilized
    } else {
        status
    }
}

/// Restores up to `amount` hp, capped at base. A downed combatant brought
/// above zero is back on its feet with fresh death saves. The dead stay dead.
pub fn heal(combatant: &mut Combatant, amount: i32) -> VitalityReport {
    let previous = combatant.status;
    if previous.is_dead() || amount <= 0 {
        return VitalityReport::unchanged(previous);
    }
    let hp = &mut combatant.hit_points;
    hp.current = (hp.current + amount).min(hp.base);
    if hp.current > 0 && previous.is_downed() {
        combatant.death_saves.reset();
        combatant.status = VitalityStatus::Alive;
    }
    VitalityReport {
        previous,
        status: combatant.status,
        death_save: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{AbilityScores, DeathSaves};
    use crate::dice::ScriptedRng;

    fn create_test_combatant(base: i32, current: i32) -> Combatant {
        let mut c = Combatant::new("Test", 1, AbilityScores::average(), base);
        c.hit_points.current = current;
        c
    }

    fn downed(base: i32) -> Combatant {
        let mut c = create_test_combatant(base, 0);
        c.status = VitalityStatus::Unconscious;
        c
    }

    fn rules() -> DeathSaveRules {
        DeathSaveRules::default()
    }

    #[test]
    fn massive_damage_kills_outright() {
        let mut c = create_test_combatant(20, 5);
        let report = apply_damage(&mut c, 20, false, &rules(), &mut ScriptedRng::default());
        assert_eq!(report.status, VitalityStatus::Dead);
        assert!(report.died());
        assert_eq!(c.hit_points.current, 0);
    }

    #[test]
    fn dropping_to_zero_knocks_out() {
        let mut c = create_test_combatant(20, 5);
        let report = apply_damage(&mut c, 7, false, &rules(), &mut ScriptedRng::default());
        assert_eq!(report.status, VitalityStatus::Unconscious);
        assert_eq!(report.death_save, None);
    }

    #[test]
    fn surviving_damage_stays_alive() {
        let mut c = create_test_combatant(20, 20);
        let report = apply_damage(&mut c, 6, true, &rules(), &mut ScriptedRng::default());
        assert_eq!(report.status, VitalityStatus::Alive);
        assert!(!report.changed());
        assert_eq!(c.hit_points.current, 14);
    }

    #[test]
    fn three_failed_saves_kill_and_reset() {
        let mut c = downed(20);
        let mut rng = ScriptedRng::new([4, 7, 2]);
        assert_eq!(check_status(&mut c, 0, false, &rules(), &mut rng).status, VitalityStatus::Unconscious);
        assert_eq!(c.death_saves.failures, 1);
        assert_eq!(check_status(&mut c, 0, false, &rules(), &mut rng).status, VitalityStatus::Unconscious);
        let report = check_status(&mut c, 0, false, &rules(), &mut rng);
        assert_eq!(report.status, VitalityStatus::Dead);
        assert_eq!(report.death_save, Some(2));
        assert_eq!(c.death_saves, DeathSaves::default());
    }

    #[test]
    fn three_successes_stabilize() {
        let mut c = downed(20);
        let mut rng = ScriptedRng::new([10, 15, 19]);
        for _ in 0..2 {
            check_status(&mut c, 0, false, &rules(), &mut rng);
        }
        assert_eq!(c.death_saves.successes, 2);
        let report = check_status(&mut c, 0, false, &rules(), &mut rng);
        assert_eq!(report.status, VitalityStatus::Stabilized);
        assert_eq!(c.death_saves, DeathSaves::default());

        // stabilized with no damage rolls nothing
        let report = check_status(&mut c, 0, false, &rules(), &mut rng);
        assert_eq!(report.status, VitalityStatus::Stabilized);
        assert_eq!(report.death_save, None);
    }

    #[test]
    fn natural_twenty_revives_at_one_hp() {
        let mut c = downed(20);
        c.death_saves.failures = 2;
        let report = check_status(&mut c, 0, false, &rules(), &mut ScriptedRng::new([20]));
        assert_eq!(report.status, VitalityStatus::Alive);
        assert_eq!(c.hit_points.current, 1);
        assert_eq!(c.death_saves, DeathSaves::default());
    }

    #[test]
    fn natural_one_counts_twice() {
        let mut c = downed(20);
        check_status(&mut c, 0, false, &rules(), &mut ScriptedRng::new([1]));
        assert_eq!(c.death_saves.failures, 2);
        assert_eq!(c.status, VitalityStatus::Unconscious);
    }

    #[test]
    fn critical_on_downed_adds_two_failures_without_roll() {
        let mut c = downed(20);
        c.death_saves.failures = 1;
        let report = apply_damage(&mut c, 4, true, &rules(), &mut ScriptedRng::new([20]));
        assert_eq!(report.death_save, None);
        assert_eq!(report.status, VitalityStatus::Dead);
    }

    #[test]
    fn critical_on_stabilized_reopens_wounds() {
        let mut c = downed(20);
        c.status = VitalityStatus::Stabilized;
        let report = apply_damage(&mut c, 3, true, &rules(), &mut ScriptedRng::default());
        assert_eq!(report.status, VitalityStatus::Unconscious);
        assert_eq!(c.death_saves.failures, 2);
    }

    #[test]
    fn ordinary_hit_on_stabilized_adds_one_failure() {
        let mut c = downed(20);
        c.status = VitalityStatus::Stabilized;
        let report = apply_damage(&mut c, 3, false, &rules(), &mut ScriptedRng::default());
        assert_eq!(report.status, VitalityStatus::Unconscious);
        assert_eq!(c.death_saves.failures, 1);
    }

    #[test]
    fn same_rolls_same_outcome() {
        let run = || {
            let mut c = downed(20);
            let mut rng = ScriptedRng::new([12, 3, 1, 18]);
            (0..4)
                .map(|_| check_status(&mut c, 0, false, &rules(), &mut rng).status)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn heal_revives_downed_but_not_dead() {
        let mut c = downed(20);
        c.death_saves.failures = 2;
        let report = heal(&mut c, 50);
        assert_eq!(report.status, VitalityStatus::Alive);
        assert_eq!(c.hit_points.current, 20);
        assert_eq!(c.death_saves, DeathSaves::default());

        let mut corpse = downed(20);
        corpse.status = VitalityStatus::Dead;
        assert_eq!(heal(&mut corpse, 5).status, VitalityStatus::Dead);
        assert_eq!(corpse.hit_points.current, 0);
    }

    #[test]
    fn the_dead_ignore_damage() {
        let mut c = downed(20);
        c.status = VitalityStatus::Dead;
        let report = apply_damage(&mut c, 5, true, &rules(), &mut ScriptedRng::default());
        assert!(!report.changed());
    }
}
