//! Combatant records.
//!
//! A [`Combatant`] carries everything the rules need about one fighter:
//! derived stats, gear, vitality and the per-turn resource pool. It holds no
//! reference to the grid or the scheduler, so it can be serialized on its
//! own and outlive an encounter for post-combat stats.

mod abilities;
mod gear;
mod resources;
mod vitals;

use std::fmt;

pub use abilities::{Ability, AbilityModifiers, AbilityScores, modifier_for};
pub use gear::{Armor, MELEE_REACH_FT, OffHand, Weapon};
pub use resources::TurnResources;
pub use vitals::{DeathSaves, HitPoints, VitalityStatus};

use crate::grid::Position;

/// Identifier of a combatant within one roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    #[default]
    One,
    Two,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

/// Who decides this combatant's actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    #[default]
    Ai,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FightingStyle {
    /// +2 to ranged attack rolls.
    Archery,
    /// +1 AC.
    Defense,
    /// +2 damage with a one-handed melee weapon and no off-hand weapon.
    Dueling,
    /// Reaction: impose disadvantage on an attack against an adjacent ally.
    /// Requires a shield.
    Protection,
    /// Reaction: reduce damage to an adjacent ally by `1d10 + proficiency`.
    Interception,
    /// Reroll 1s and 2s on two-handed melee damage dice.
    GreatWeaponFighting,
}

/// Lifetime tallies carried between encounters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub wins: u32,
    pub defeats: u32,
    pub games: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub race: String,
    pub class_name: String,
    pub team: Team,
    pub control: Control,
    pub level: u32,

    pub scores: AbilityScores,
    pub modifiers: AbilityModifiers,

    pub main_hand: Weapon,
    pub off_hand: OffHand,
    pub armor: Armor,
    pub fighting_style: Option<FightingStyle>,
    /// Attacks per Attack action, minus one.
    pub extra_attacks: u8,
    /// Whether the once-per-encounter self-heal is still unused.
    pub second_wind: bool,

    pub hit_points: HitPoints,
    pub status: VitalityStatus,
    pub death_saves: DeathSaves,
    pub resources: TurnResources,

    pub position: Position,
    pub initiative: i32,
    pub record: Record,
}

impl Combatant {
    /// A level-`level` combatant with full hit points, fists and no armor.
    pub fn new(name: impl Into<String>, level: u32, scores: AbilityScores, base_hp: i32) -> Self {
        Self {
            id: CombatantId::default(),
            name: name.into(),
            race: String::new(),
            class_name: String::new(),
            team: Team::One,
            control: Control::Ai,
            level: level.max(1),
            scores,
            modifiers: scores.modifiers(),
            main_hand: Weapon::unarmed(),
            off_hand: OffHand::Empty,
            armor: Armor::unarmored(),
            fighting_style: None,
            extra_attacks: 0,
            second_wind: false,
            hit_points: HitPoints::full(base_hp.max(1)),
            status: VitalityStatus::Alive,
            death_saves: DeathSaves::default(),
            resources: TurnResources::default(),
            position: Position::ORIGIN,
            initiative: 0,
            record: Record::default(),
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.main_hand = weapon;
        self
    }

    pub fn with_off_hand(mut self, off_hand: OffHand) -> Self {
        self.off_hand = off_hand;
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_style(mut self, style: FightingStyle) -> Self {
        self.fighting_style = Some(style);
        self
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = team;
        self
    }

    pub fn rederive_modifiers(&mut self) {
        self.modifiers = self.scores.modifiers();
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.modifiers.get(ability)
    }

    pub fn has_style(&self, style: FightingStyle) -> bool {
        self.fighting_style == Some(style)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        2 + (self.level.max(1) as i32 - 1) / 4
    }

    pub fn armor_class(&self) -> i32 {
        let defense = if self.has_style(FightingStyle::Defense) { 1 } else { 0 };
        self.armor.armor_class(self.modifier(Ability::Dexterity))
            + self.off_hand.shield_bonus()
            + defense
    }

    /// Bonus added to a d20 attack roll with the main-hand weapon.
    pub fn attack_modifier(&self) -> i32 {
        let weapon = &self.main_hand;
        let archery = if weapon.is_ranged() && self.has_style(FightingStyle::Archery) {
            2
        } else {
            0
        };
        self.modifier(weapon.ability) + self.proficiency_bonus() + archery
    }

    /// Flat bonus added to main-hand damage dice.
    pub fn damage_bonus(&self) -> i32 {
        let weapon = &self.main_hand;
        let dueling = self.has_style(FightingStyle::Dueling)
            && !weapon.is_ranged()
            && !weapon.two_handed
            && !self.off_hand.has_weapon();
        self.modifier(weapon.ability) + if dueling { 2 } else { 0 }
    }

    /// Damage faces at or below this value are rerolled once.
    pub fn damage_reroll_floor(&self) -> u32 {
        let weapon = &self.main_hand;
        let gwf = self.has_style(FightingStyle::GreatWeaponFighting)
            && weapon.two_handed
            && !weapon.is_ranged();
        weapon.mastery_reroll.max(if gwf { 2 } else { 0 })
    }

    pub fn attacks_per_action(&self) -> u8 {
        self.extra_attacks.saturating_add(1)
    }

    pub fn is_alive(&self) -> bool {
        self.status.can_act()
    }

    pub fn is_enemy_of(&self, other: &Combatant) -> bool {
        self.team != other.team
    }

    /// Start-of-turn refill; reactions are refilled per round instead.
    pub fn begin_turn(&mut self, speed: f64) {
        self.resources.reset_turn(speed);
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DiceSpec;

    fn fighter() -> Combatant {
        // STR 16, DEX 14
        Combatant::new("Brena", 5, AbilityScores::new([16, 14, 12, 10, 10, 8]), 40)
    }

    #[test]
    fn proficiency_scales_every_four_levels() {
        let mut c = fighter();
        c.level = 1;
        assert_eq!(c.proficiency_bonus(), 2);
        c.level = 4;
        assert_eq!(c.proficiency_bonus(), 2);
        c.level = 5;
        assert_eq!(c.proficiency_bonus(), 3);
        c.level = 17;
        assert_eq!(c.proficiency_bonus(), 6);
    }

    #[test]
    fn armor_class_stacks_shield_and_defense() {
        let c = fighter()
            .with_armor(Armor::new("Scale mail", 14, Some(2)))
            .with_off_hand(OffHand::Shield { ac_bonus: 2 })
            .with_style(FightingStyle::Defense);
        assert_eq!(c.armor_class(), 14 + 2 + 2 + 1);
    }

    #[test]
    fn archery_only_helps_ranged_attacks() {
        let bow = Weapon::new("Longbow", 150, DiceSpec::new(1, 8), Ability::Dexterity);
        let archer = fighter().with_weapon(bow).with_style(FightingStyle::Archery);
        assert_eq!(archer.attack_modifier(), 2 + 3 + 2);

        let sword = Weapon::new("Longsword", 5, DiceSpec::new(1, 8), Ability::Strength);
        let swordsman = fighter().with_weapon(sword).with_style(FightingStyle::Archery);
        assert_eq!(swordsman.attack_modifier(), 3 + 3);
    }

    #[test]
    fn dueling_needs_a_free_off_hand() {
        let sword = Weapon::new("Longsword", 5, DiceSpec::new(1, 8), Ability::Strength);
        let duelist = fighter()
            .with_weapon(sword.clone())
            .with_style(FightingStyle::Dueling);
        assert_eq!(duelist.damage_bonus(), 5);

        let dual = duelist.with_off_hand(OffHand::Weapon(sword));
        assert_eq!(dual.damage_bonus(), 3);
    }

    #[test]
    fn great_weapon_fighting_sets_reroll_floor() {
        let mut greatsword = Weapon::new("Greatsword", 5, DiceSpec::new(2, 6), Ability::Strength);
        greatsword.two_handed = true;
        let c = fighter()
            .with_weapon(greatsword)
            .with_style(FightingStyle::GreatWeaponFighting);
        assert_eq!(c.damage_reroll_floor(), 2);
        assert_eq!(fighter().damage_reroll_floor(), 0);
    }
}
