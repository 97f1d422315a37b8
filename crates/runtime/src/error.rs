//! Errors surfaced by the encounter API.
//!
//! Rule violations from the core come through as [`EncounterError::Action`]
//! so hosts can match on the original [`ActionError`]. Setup problems are
//! kept apart in [`SetupError`] because they happen before there is an
//! encounter to report against.

use skirmish_core::{ActionError, CombatantId, ErrorSeverity, GameError, Position, Team};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EncounterError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncounterError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("{id} cannot act now; active combatant is {active:?}")]
    NotActive {
        id: CombatantId,
        active: Option<CombatantId>,
    },

    #[error("encounter has already finished")]
    Finished,

    #[error("corrupt encounter state: {0}")]
    CorruptEncounterState(String),
}

impl EncounterError {
    pub(crate) fn corrupt(detail: impl Into<String>) -> Self {
        Self::CorruptEncounterState(detail.into())
    }
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action(err) => err.severity(),
            Self::NotActive { .. } | Self::Finished => ErrorSeverity::Validation,
            Self::CorruptEncounterState(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action(err) => err.error_code(),
            Self::NotActive { .. } => "ENCOUNTER_NOT_ACTIVE",
            Self::Finished => "ENCOUNTER_FINISHED",
            Self::CorruptEncounterState(_) => "ENCOUNTER_CORRUPT_STATE",
        }
    }
}

/// Reasons an encounter could not be started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("team {0} has no combatants")]
    EmptyTeam(Team),

    #[error("grid size {size} is below the minimum of {min}")]
    GridTooSmall { size: u32, min: u32 },

    #[error("no free cell left to place {name}")]
    NoRoom { name: String },

    #[error("cannot place {name} at {position}")]
    Placement {
        name: String,
        position: Position,
        #[source]
        source: ActionError,
    },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTeam(_) => "SETUP_EMPTY_TEAM",
            Self::GridTooSmall { .. } => "SETUP_GRID_TOO_SMALL",
            Self::NoRoom { .. } => "SETUP_NO_ROOM",
            Self::Placement { .. } => "SETUP_PLACEMENT",
        }
    }
}
