//! Encounter lineups: who fights on which side, before any dice for
//! placement or initiative are rolled.

use skirmish_core::{Combatant, RngSource};

use crate::character::{BuildError, CharacterFactory, CharacterSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Placement {
    /// Each team scattered around a random centre on its own side.
    #[default]
    Clustered,
    /// Everyone starts on the position in their spec.
    Fixed,
}

/// A fight as written in an encounter file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterSpec {
    /// Dice seed; hosts may override it.
    pub seed: Option<u64>,
    pub placement: Placement,
    pub team_one: Vec<CharacterSpec>,
    pub team_two: Vec<CharacterSpec>,
    /// Split between the teams by level after the fixed members join.
    pub pool: Vec<CharacterSpec>,
}

/// Built combatants, ready to hand to an encounter builder.
#[derive(Clone, Debug, PartialEq)]
pub struct Lineup {
    pub placement: Placement,
    pub team_one: Vec<Combatant>,
    pub team_two: Vec<Combatant>,
    pub pool: Vec<Combatant>,
}

impl EncounterSpec {
    /// Builds every listed character, team one first, then team two, then
    /// the pool.
    pub fn build(
        &self,
        factory: &CharacterFactory<'_>,
        rng: &mut (impl RngSource + ?Sized),
    ) -> Result<Lineup, BuildError> {
        let team_one = self.build_side(&self.team_one, factory, rng)?;
        let team_two = self.build_side(&self.team_two, factory, rng)?;
        let pool = self.build_side(&self.pool, factory, rng)?;
        Ok(Lineup {
            placement: self.placement,
            team_one,
            team_two,
            pool,
        })
    }

    fn build_side(
        &self,
        specs: &[CharacterSpec],
        factory: &CharacterFactory<'_>,
        rng: &mut (impl RngSource + ?Sized),
    ) -> Result<Vec<Combatant>, BuildError> {
        let mut side = Vec::with_capacity(specs.len());
        for spec in specs {
            if self.placement == Placement::Fixed && spec.position.is_none() {
                return Err(BuildError::MissingPosition {
                    name: spec.name.clone(),
                });
            }
            side.push(factory.build(spec, rng)?);
        }
        Ok(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{ClassEntry, GameTables, RaceEntry};
    use skirmish_core::{Position, ScriptedRng};

    fn tables() -> GameTables {
        GameTables {
            races: vec![RaceEntry {
                name: "Human".into(),
                bonuses: Vec::new(),
                free_bonuses: 0,
            }],
            classes: vec![ClassEntry {
                name: "Fighter".into(),
                hit_die: 10,
                hp_mod: 0,
                fighting_style: None,
                extra_attack_levels: Vec::new(),
                second_wind: true,
            }],
            ..GameTables::default()
        }
    }

    #[test]
    fn fixed_placement_needs_positions() {
        let tables = tables();
        let factory = CharacterFactory::new(&tables);
        let mut spec = EncounterSpec {
            placement: Placement::Fixed,
            team_one: vec![CharacterSpec::new("Ash", "Human", "Fighter")],
            team_two: vec![CharacterSpec::new("Bryn", "Human", "Fighter")],
            ..EncounterSpec::default()
        };
        let err = spec.build(&factory, &mut ScriptedRng::new([])).unwrap_err();
        assert_eq!(err, BuildError::MissingPosition { name: "Ash".into() });

        spec.team_one[0].position = Some(Position::new(1, 1));
        spec.team_two[0].position = Some(Position::new(6, 6));
        let lineup = spec.build(&factory, &mut ScriptedRng::new([])).unwrap();
        assert_eq!(lineup.team_two[0].position, Position::new(6, 6));
        assert!(lineup.pool.is_empty());
    }
}
