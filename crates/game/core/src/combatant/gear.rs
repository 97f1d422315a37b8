//! Weapons, shields and armor.

use super::Ability;
use crate::dice::DiceSpec;
use crate::grid::Position;

/// Reach at or below which a weapon counts as melee.
pub const MELEE_REACH_FT: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    /// Melee reach or ranged range, in feet.
    pub reach_ft: u32,
    pub damage: DiceSpec,
    /// Ability that drives attack and damage rolls.
    pub ability: Ability,
    #[cfg_attr(feature = "serde", serde(default))]
    pub two_handed: bool,
    /// Damage faces at or below this value are rerolled once.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mastery_reroll: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, reach_ft: u32, damage: DiceSpec, ability: Ability) -> Self {
        Self {
            name: name.into(),
            reach_ft,
            damage,
            ability,
            two_handed: false,
            mastery_reroll: 0,
        }
    }

    /// Bare fists: 1d1 with strength, 5 ft.
    pub fn unarmed() -> Self {
        Self::new("Unarmed", 5, DiceSpec::new(1, 1), Ability::Strength)
    }

    pub fn is_ranged(&self) -> bool {
        self.reach_ft > MELEE_REACH_FT
    }

    /// Whether a wielder at `from` can strike `to`.
    ///
    /// Melee reach is measured in king moves, ranged reach in straight-line
    /// feet.
    pub fn reaches(&self, from: Position, to: Position, feet_per_cell: f64) -> bool {
        if from == to {
            return false;
        }
        let distance = if self.is_ranged() {
            from.euclidean(to) * feet_per_cell
        } else {
            f64::from(from.chebyshev(to)) * feet_per_cell
        };
        distance <= f64::from(self.reach_ft)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffHand {
    #[default]
    Empty,
    Shield {
        ac_bonus: i32,
    },
    Weapon(Weapon),
}

impl OffHand {
    pub fn shield_bonus(&self) -> i32 {
        match self {
            OffHand::Shield { ac_bonus } => *ac_bonus,
            _ => 0,
        }
    }

    pub fn has_shield(&self) -> bool {
        matches!(self, OffHand::Shield { .. })
    }

    pub fn has_weapon(&self) -> bool {
        matches!(self, OffHand::Weapon(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub base_ac: i32,
    /// Cap on the dexterity bonus; `None` for light armor and clothing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_dex_mod: Option<i32>,
}

impl Armor {
    pub fn new(name: impl Into<String>, base_ac: i32, max_dex_mod: Option<i32>) -> Self {
        Self {
            name: name.into(),
            base_ac,
            max_dex_mod,
        }
    }

    /// Plain clothes: AC 10 plus full dexterity.
    pub fn unarmored() -> Self {
        Self::new("Unarmored", 10, None)
    }

    pub fn armor_class(&self, dex_mod: i32) -> i32 {
        let dex = match self.max_dex_mod {
            Some(cap) => dex_mod.min(cap),
            None => dex_mod,
        };
        self.base_ac + dex
    }
}
