//! Static rules tables: races, classes, weapons and armor.
//!
//! Tables are plain data. Lookups go by display name, the same names a
//! [`CharacterSpec`](crate::CharacterSpec) refers to.

use skirmish_core::{Ability, Armor, FightingStyle, Weapon};

/// AC granted by a shield when the tables don't say otherwise.
pub const DEFAULT_SHIELD_AC: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceEntry {
    pub name: String,
    /// Fixed ability increases.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Vec<(Ability, i32)>,
    /// Number of distinct abilities the player raises by one point each.
    #[cfg_attr(feature = "serde", serde(default))]
    pub free_bonuses: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassEntry {
    pub name: String,
    /// Faces of the class hit die, e.g. 10 for a d10.
    pub hit_die: u32,
    /// Extra hit points per level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_mod: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fighting_style: Option<FightingStyle>,
    /// Extra attacks per Attack action, indexed by the level they arrive at.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_attack_levels: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub second_wind: bool,
}

impl ClassEntry {
    /// Extra attacks a member of this class has at `level`.
    pub fn extra_attacks_at(&self, level: u32) -> u8 {
        let count = self
            .extra_attack_levels
            .iter()
            .filter(|&&from| level >= from)
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }
}

fn default_shield_ac() -> i32 {
    DEFAULT_SHIELD_AC
}

/// Every table a character build draws on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTables {
    pub races: Vec<RaceEntry>,
    pub classes: Vec<ClassEntry>,
    pub weapons: Vec<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armors: Vec<Armor>,
    #[cfg_attr(feature = "serde", serde(default = "default_shield_ac"))]
    pub shield_ac: i32,
}

impl Default for GameTables {
    fn default() -> Self {
        Self {
            races: Vec::new(),
            classes: Vec::new(),
            weapons: Vec::new(),
            armors: Vec::new(),
            shield_ac: DEFAULT_SHIELD_AC,
        }
    }
}

impl GameTables {
    pub fn race(&self, name: &str) -> Option<&RaceEntry> {
        self.races.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.name.eq_ignore_ascii_case(name))
    }

    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armors.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_attacks_accumulate_by_level() {
        let fighter = ClassEntry {
            name: "Fighter".into(),
            hit_die: 10,
            hp_mod: 0,
            fighting_style: None,
            extra_attack_levels: vec![5, 11, 20],
            second_wind: true,
        };
        assert_eq!(fighter.extra_attacks_at(1), 0);
        assert_eq!(fighter.extra_attacks_at(5), 1);
        assert_eq!(fighter.extra_attacks_at(12), 2);
        assert_eq!(fighter.extra_attacks_at(20), 3);
    }

    #[test]
    fn lookups_ignore_case() {
        let tables = GameTables {
            races: vec![RaceEntry {
                name: "Half-Orc".into(),
                bonuses: vec![(Ability::Strength, 2)],
                free_bonuses: 0,
            }],
            ..GameTables::default()
        };
        assert!(tables.race("half-orc").is_some());
        assert!(tables.race("Elf").is_none());
        assert_eq!(tables.shield_ac, DEFAULT_SHIELD_AC);
    }
}
