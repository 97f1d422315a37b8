//! Damage rolls and reductions.

use crate::dice::{DiceSpec, RngSource};

/// Breakdown of a damage roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    /// Dice actually rolled (doubled on a critical).
    pub dice: DiceSpec,
    pub rolled: u32,
    pub bonus: i32,
    /// `rolled + bonus`, never negative.
    pub total: i32,
}

/// Rolls weapon damage. A critical doubles the number of dice, not the
/// bonus. Faces at or below `reroll_floor` are rerolled once.
pub fn roll_damage(
    dice: DiceSpec,
    critical: bool,
    bonus: i32,
    reroll_floor: u32,
    rng: &mut (impl RngSource + ?Sized),
) -> DamageRoll {
    let dice = if critical { dice.doubled() } else { dice };
    let rolled = dice.roll_rerolling(rng, reroll_floor);
    DamageRoll {
        dice,
        rolled,
        bonus,
        total: (rolled as i32 + bonus).max(0),
    }
}

/// `max(0, raw - reduction)`.
pub fn reduce(raw: i32, reduction: i32) -> i32 {
    (raw - reduction.max(0)).max(0)
}

/// Damage soaked by an intercepting ally: `1d10 + proficiency`.
pub fn interception_reduction(proficiency: i32, rng: &mut (impl RngSource + ?Sized)) -> i32 {
    rng.roll_die(10) as i32 + proficiency
}
