//! Encounter runtime for the skirmish rules engine.
//!
//! This crate owns a running fight: it builds the encounter, schedules
//! turns, plays AI turns through behavior trees and applies player commands.
//! Hosts drive it synchronously and read back what happened as
//! [`EncounterEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`encounter`] hosts setup, the turn scheduler and the engine API
//! - [`ai`] holds target scoring, behavior-tree leaves and profiles
//! - [`events`] defines what hosts observe
//! - [`error`] classifies rejected commands and setup failures
pub mod ai;
pub mod encounter;
pub mod error;
pub mod events;

pub use ai::{BehaviorProfile, TurnContext};
pub use encounter::{
    Encounter, EncounterBuilder, EncounterResult, MIN_GRID_SIZE, MoveReport, TurnAdvance,
    start_encounter,
};
pub use error::{EncounterError, Result, SetupError};
pub use events::EncounterEvent;
