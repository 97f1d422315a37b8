//! Non-interactive character builds.
//!
//! A [`CharacterSpec`] names a race, a class, gear and how to obtain ability
//! scores. [`CharacterFactory`] resolves those names against [`GameTables`]
//! and derives the combat record: racial bonuses, modifiers, hit points,
//! attacks and features.

use skirmish_core::{
    Ability, AbilityScores, Armor, Combatant, Control, DiceSpec, ErrorSeverity, FightingStyle,
    GameError, OffHand, Position, RngSource, Weapon,
};
use strum::IntoEnumIterator;

use crate::tables::{ClassEntry, GameTables, RaceEntry};

/// Scores handed out by the standard array, highest first.
pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// How a build obtains its six raw scores.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityMethod {
    #[default]
    Standard,
    /// Six rolls of 4d6, dropping the lowest die of each.
    Rolled,
    /// Scores given in sheet order; no assignment by priority.
    Fixed(AbilityScores),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OffHandChoice {
    #[default]
    Empty,
    Shield,
    /// Weapon name from the tables.
    Weapon(String),
}

fn first_level() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSpec {
    pub name: String,
    pub race: String,
    pub class: String,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: AbilityMethod,
    /// Abilities that receive the highest generated scores, best first.
    /// Unlisted abilities take what is left in sheet order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: Vec<Ability>,
    /// Abilities raised by the race's free bonus points.
    #[cfg_attr(feature = "serde", serde(default))]
    pub free_bonuses: Vec<Ability>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub off_hand: OffHandChoice,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<String>,
    /// Replaces the class's fighting style.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fighting_style: Option<FightingStyle>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub control: Control,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
}

impl CharacterSpec {
    /// A level 1 build with the standard array and no gear.
    pub fn new(name: impl Into<String>, race: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            race: race.into(),
            class: class.into(),
            level: 1,
            abilities: AbilityMethod::Standard,
            priority: Vec::new(),
            free_bonuses: Vec::new(),
            weapon: None,
            off_hand: OffHandChoice::Empty,
            armor: None,
            fighting_style: None,
            control: Control::Ai,
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("{name}: unknown race `{race}`")]
    UnknownRace { name: String, race: String },

    #[error("{name}: unknown class `{class}`")]
    UnknownClass { name: String, class: String },

    #[error("{name}: unknown weapon `{weapon}`")]
    UnknownWeapon { name: String, weapon: String },

    #[error("{name}: unknown armor `{armor}`")]
    UnknownArmor { name: String, armor: String },

    #[error("{name}: {race} grants {expected} free ability bonuses, {got} chosen")]
    FreeBonusCount {
        name: String,
        race: String,
        expected: u8,
        got: usize,
    },

    #[error("{name}: {ability} chosen twice for a free bonus")]
    RepeatedFreeBonus { name: String, ability: Ability },

    #[error("{name}: fixed placement needs a position")]
    MissingPosition { name: String },
}

impl GameError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use BuildError::*;
        match self {
            UnknownRace { .. } => "BUILD_UNKNOWN_RACE",
            UnknownClass { .. } => "BUILD_UNKNOWN_CLASS",
            UnknownWeapon { .. } => "BUILD_UNKNOWN_WEAPON",
            UnknownArmor { .. } => "BUILD_UNKNOWN_ARMOR",
            FreeBonusCount { .. } => "BUILD_FREE_BONUS_COUNT",
            RepeatedFreeBonus { .. } => "BUILD_REPEATED_FREE_BONUS",
            MissingPosition { .. } => "BUILD_MISSING_POSITION",
        }
    }
}

/// One 4d6-drop-lowest score.
pub fn roll_ability_score(rng: &mut (impl RngSource + ?Sized)) -> i32 {
    let dice: [u32; 4] = std::array::from_fn(|_| rng.roll_die(6));
    let lowest = dice.iter().copied().min().unwrap_or(0);
    (dice.iter().sum::<u32>() - lowest) as i32
}

/// Hands `values` out by `priority`, then to the remaining abilities in
/// sheet order. Values go highest first.
pub fn assign_scores(mut values: [i32; 6], priority: &[Ability]) -> AbilityScores {
    values.sort_unstable_by(|a, b| b.cmp(a));
    let mut order: Vec<Ability> = Vec::with_capacity(values.len());
    for ability in priority.iter().copied().chain(Ability::iter()) {
        if !order.contains(&ability) {
            order.push(ability);
        }
    }
    let mut scores = AbilityScores::average();
    for (ability, value) in order.into_iter().zip(values) {
        scores.set(ability, value);
    }
    scores
}

/// Builds combatants from specs against one set of tables.
pub struct CharacterFactory<'t> {
    tables: &'t GameTables,
}

impl<'t> CharacterFactory<'t> {
    pub fn new(tables: &'t GameTables) -> Self {
        Self { tables }
    }

    pub fn build(
        &self,
        spec: &CharacterSpec,
        rng: &mut (impl RngSource + ?Sized),
    ) -> Result<Combatant, BuildError> {
        let race = self
            .tables
            .race(&spec.race)
            .ok_or_else(|| BuildError::UnknownRace {
                name: spec.name.clone(),
                race: spec.race.clone(),
            })?;
        let class = self
            .tables
            .class(&spec.class)
            .ok_or_else(|| BuildError::UnknownClass {
                name: spec.name.clone(),
                class: spec.class.clone(),
            })?;
        let main_hand = match &spec.weapon {
            Some(weapon) => self.weapon(&spec.name, weapon)?,
            None => Weapon::unarmed(),
        };
        let off_hand = match &spec.off_hand {
            OffHandChoice::Empty => OffHand::Empty,
            OffHandChoice::Shield => OffHand::Shield {
                ac_bonus: self.tables.shield_ac,
            },
            OffHandChoice::Weapon(weapon) => OffHand::Weapon(self.weapon(&spec.name, weapon)?),
        };
        let armor = match &spec.armor {
            Some(armor) => self
                .tables
                .armor(armor)
                .cloned()
                .ok_or_else(|| BuildError::UnknownArmor {
                    name: spec.name.clone(),
                    armor: armor.clone(),
                })?,
            None => Armor::unarmored(),
        };

        let level = spec.level.max(1);
        let mut scores = match &spec.abilities {
            AbilityMethod::Standard => assign_scores(STANDARD_ARRAY, &spec.priority),
            AbilityMethod::Rolled => {
                let rolled = std::array::from_fn(|_| roll_ability_score(rng));
                assign_scores(rolled, &spec.priority)
            }
            AbilityMethod::Fixed(scores) => *scores,
        };
        apply_racial_bonuses(&mut scores, race, spec)?;

        let con = scores.modifiers().get(Ability::Constitution);
        let base_hp = roll_hit_points(class, level, con, rng);

        let mut combatant = Combatant::new(spec.name.clone(), level, scores, base_hp)
            .with_weapon(main_hand)
            .with_off_hand(off_hand)
            .with_armor(armor);
        combatant.race = race.name.clone();
        combatant.class_name = class.name.clone();
        combatant.fighting_style = spec.fighting_style.or(class.fighting_style);
        combatant.extra_attacks = class.extra_attacks_at(level);
        combatant.second_wind = class.second_wind;
        combatant.control = spec.control;
        if let Some(position) = spec.position {
            combatant.position = position;
        }
        Ok(combatant)
    }

    fn weapon(&self, owner: &str, name: &str) -> Result<Weapon, BuildError> {
        self.tables
            .weapon(name)
            .cloned()
            .ok_or_else(|| BuildError::UnknownWeapon {
                name: owner.to_string(),
                weapon: name.to_string(),
            })
    }
}

fn apply_racial_bonuses(
    scores: &mut AbilityScores,
    race: &RaceEntry,
    spec: &CharacterSpec,
) -> Result<(), BuildError> {
    for &(ability, bonus) in &race.bonuses {
        scores.add(ability, bonus);
    }
    if spec.free_bonuses.len() != usize::from(race.free_bonuses) {
        return Err(BuildError::FreeBonusCount {
            name: spec.name.clone(),
            race: race.name.clone(),
            expected: race.free_bonuses,
            got: spec.free_bonuses.len(),
        });
    }
    for (i, &ability) in spec.free_bonuses.iter().enumerate() {
        if spec.free_bonuses[..i].contains(&ability) {
            return Err(BuildError::RepeatedFreeBonus {
                name: spec.name.clone(),
                ability,
            });
        }
        scores.add(ability, 1);
    }
    Ok(())
}

/// Full hit die at level 1, rolled hit dice after that, plus constitution
/// and class bonus per level. Never below 1.
pub fn roll_hit_points(
    class: &ClassEntry,
    level: u32,
    con_mod: i32,
    rng: &mut (impl RngSource + ?Sized),
) -> i32 {
    let level = level.max(1);
    let rolled = DiceSpec::new(level - 1, class.hit_die).roll(rng);
    let per_level = (con_mod + class.hp_mod) * level as i32;
    (class.hit_die as i32 + rolled as i32 + per_level).max(1)
}
