//! Headless host for the skirmish engine.
//!
//! Reads rules, tables and an encounter from disk, lets the AI play every
//! turn and reports the outcome. Everything the binary does is available
//! here so it can be driven from tests.

pub mod config;
pub mod session;

pub use config::ClientConfig;
pub use session::{CombatantSummary, Session, Summary, prepare};
