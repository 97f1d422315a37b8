//! Loading content and running one encounter headlessly.

use anyhow::{Context, Result};
use serde::Serialize;
use skirmish_content::{
    CharacterFactory, ConfigLoader, EncounterLoader, Placement, TablesLoader,
};
use skirmish_core::{HitPoints, PcgRng, Record, RulesConfig, Team, VitalityStatus};
use skirmish_runtime::{Encounter, EncounterBuilder, EncounterResult};
use tracing::{debug, info};

use crate::config::ClientConfig;

/// An encounter ready to play, with the seed that set it up.
pub struct Session {
    pub encounter: Encounter<PcgRng>,
    pub seed: u64,
}

/// End-of-encounter report printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub result: EncounterResult,
    pub combatants: Vec<CombatantSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantSummary {
    pub name: String,
    pub race: String,
    pub class_name: String,
    pub level: u32,
    pub team: Team,
    pub status: VitalityStatus,
    pub hit_points: HitPoints,
    pub record: Record,
}

/// Loads rules, tables and the encounter named by `config`, builds every
/// character and starts the encounter.
pub fn prepare(config: &ClientConfig) -> Result<Session> {
    let rules = match &config.rules {
        Some(path) => ConfigLoader::load(path)?,
        None => RulesConfig::default(),
    };
    let tables = TablesLoader::load(&config.tables)?;
    let spec = EncounterLoader::load(&config.encounter)?;

    let seed = config.seed.or(spec.seed).unwrap_or_else(rand::random);
    info!(seed, encounter = %config.encounter.display(), "preparing encounter");

    let mut rng = PcgRng::new(seed);
    let lineup = spec
        .build(&CharacterFactory::new(&tables), &mut rng)
        .with_context(|| format!("Failed to build {}", config.encounter.display()))?;
    debug!(
        team_one = lineup.team_one.len(),
        team_two = lineup.team_two.len(),
        pool = lineup.pool.len(),
        "lineup built"
    );

    let mut builder = EncounterBuilder::new(rules, rng)
        .team(Team::One, lineup.team_one)
        .team(Team::Two, lineup.team_two)
        .balanced(lineup.pool);
    if lineup.placement == Placement::Fixed {
        builder = builder.keep_positions();
    }
    let encounter = builder
        .start()
        .with_context(|| format!("Failed to start {}", config.encounter.display()))?;

    Ok(Session { encounter, seed })
}

impl Session {
    /// Plays every turn with the AI and returns the outcome.
    pub fn play(&mut self) -> Result<EncounterResult> {
        Ok(self.encounter.run_to_completion()?)
    }

    /// Outcome plus the final state of every combatant; `None` while the
    /// encounter is still running.
    pub fn summary(&self) -> Option<Summary> {
        let result = self.encounter.result()?;
        let combatants = self
            .encounter
            .roster()
            .iter()
            .map(|c| CombatantSummary {
                name: c.name.clone(),
                race: c.race.clone(),
                class_name: c.class_name.clone(),
                level: c.level,
                team: c.team,
                status: c.status,
                hit_points: c.hit_points,
                record: c.record,
            })
            .collect();
        Some(Summary {
            seed: self.seed,
            result,
            combatants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_runtime::EncounterEvent;
    use std::path::PathBuf;

    fn shipped(encounter: &str, seed: u64) -> ClientConfig {
        ClientConfig {
            encounter: PathBuf::from(crate::config::DEFAULT_DATA_DIR)
                .join("encounters")
                .join(format!("{encounter}.toml")),
            seed: Some(seed),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn duel_plays_to_the_end() {
        let mut session = prepare(&shipped("duel", 5)).unwrap();
        assert!(session.summary().is_none());

        let result = session.play().unwrap();
        let summary = session.summary().unwrap();
        assert_eq!(summary.result, result);
        assert_eq!(summary.seed, 5);
        assert_eq!(summary.combatants.len(), 2);
        assert!(summary.combatants.iter().all(|c| c.record.games == 1));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"name\":\"Thora\""));
        assert!(json.contains("\"class_name\":\"Barbarian\""));
    }

    #[test]
    fn pool_members_join_a_team() {
        let session = prepare(&shipped("skirmish", 11)).unwrap();
        let roster = session.encounter.roster();
        assert_eq!(roster.len(), 6);
        assert_eq!(roster.team(Team::One).len() + roster.team(Team::Two).len(), 6);
    }

    #[test]
    fn same_seed_same_fight() {
        let run = || {
            let mut session = prepare(&shipped("skirmish", 3)).unwrap();
            session.play().unwrap();
            session
                .encounter
                .drain_events()
                .into_iter()
                .filter_map(|e| match e {
                    EncounterEvent::Log(line) => Some(line),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn missing_encounter_names_the_path() {
        let config = ClientConfig {
            encounter: PathBuf::from("/nonexistent/fight.toml"),
            ..ClientConfig::default()
        };
        let err = prepare(&config).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/fight.toml"));
    }
}
