//! Rules engine for grid-based tactical skirmishes.
//!
//! `skirmish-core` owns the canonical combat rules: the terrain grid and its
//! movement costs, the pathfinder, combatant records, the vitality state
//! machine and the combat resolver. Every operation is a plain function over
//! borrowed state plus an injected [`RngSource`], so the same dice stream
//! always produces the same encounter.
//!
//! The crate does no logging. Human-readable lines are collected in a
//! [`CombatLog`] and handed back to the caller.
pub mod combat;
pub mod combatant;
pub mod config;
pub mod dice;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod roster;
pub mod vitality;

pub use combat::{AttackOutcome, AttackReport, CombatLog, CombatResolver};
pub use combatant::{
    Ability, AbilityModifiers, AbilityScores, Armor, Combatant, CombatantId, Control, DeathSaves,
    FightingStyle, HitPoints, OffHand, Record, Team, TurnResources, VitalityStatus, Weapon,
};
pub use config::{AiRules, DeathSaveRules, GridRules, MovementRules, RulesConfig, ScoreWeights};
pub use dice::{D20Roll, DiceSpec, PcgRng, RngSource, RollMode, ScriptedRng};
pub use error::{ActionError, ErrorSeverity, GameError, MoveIssue, Resource};
pub use grid::{Grid, Obstruction, Position, Terrain};
pub use pathfinding::{Approach, Pathfinder, Reach, Route};
pub use roster::Roster;
pub use vitality::{VitalityReport, apply_damage, check_status, heal};
