//! Data-driven content for the skirmish engine.
//!
//! This crate turns flat files into engine inputs:
//! - rules tables (races, classes, weapons, armor) from RON
//! - character builds resolved against those tables
//! - encounter lineups and rules configuration from TOML
//!
//! Table types and the character factory are always available; the file
//! loaders sit behind the `loaders` feature.

pub mod character;
pub mod lineup;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use character::{
    AbilityMethod, BuildError, CharacterFactory, CharacterSpec, OffHandChoice, STANDARD_ARRAY,
    assign_scores, roll_ability_score, roll_hit_points,
};
pub use lineup::{EncounterSpec, Lineup, Placement};
pub use tables::{ClassEntry, DEFAULT_SHIELD_AC, GameTables, RaceEntry};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EncounterLoader, TablesLoader};
