//! Ability scores and their modifiers.

use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// The six abilities, in sheet order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    const fn index(self) -> usize {
        self as usize
    }
}

/// Modifier for a raw score: `(score - 10) / 2`, rounded down.
pub const fn modifier_for(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Raw ability scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScores([i32; Ability::COUNT]);

impl AbilityScores {
    /// Scores in sheet order: STR, DEX, CON, INT, WIS, CHA.
    pub const fn new(scores: [i32; Ability::COUNT]) -> Self {
        Self(scores)
    }

    /// All tens, every modifier zero.
    pub const fn average() -> Self {
        Self([10; Ability::COUNT])
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        self.0[ability.index()] = score;
    }

    pub fn add(&mut self, ability: Ability, bonus: i32) {
        self.0[ability.index()] += bonus;
    }

    pub fn modifiers(&self) -> AbilityModifiers {
        let mut out = [0; Ability::COUNT];
        for ability in Ability::iter() {
            out[ability.index()] = modifier_for(self.get(ability));
        }
        AbilityModifiers(out)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::average()
    }
}

/// Modifiers derived from [`AbilityScores`]; re-derive after any score change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityModifiers([i32; Ability::COUNT]);

impl AbilityModifiers {
    pub fn get(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }
}
