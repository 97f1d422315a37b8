//! Common error infrastructure for skirmish-core.
//!
//! Rule violations are reported as [`ActionError`]. A rejected action never
//! spends resources and never leaves the grid or roster half-updated.

use crate::combatant::CombatantId;
use crate::grid::Position;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: the caller may pick another action this turn
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted encounter state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination occupied, no bonus action left.
    Recoverable,

    /// Examples: attacking an ally, attacking out of reach.
    Validation,

    /// Examples: occupancy desync, unknown combatant id.
    /// These indicate bugs and should be investigated.
    Internal,

    /// Examples: turn order referring to a vanished combatant.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all skirmish errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum MoveIssue {
    #[strum(serialize = "out of bounds")]
    OutOfBounds,
    #[strum(serialize = "occupied")]
    Occupied,
    #[strum(serialize = "no path within budget")]
    NoPath,
}

/// A per-turn or per-encounter resource an action may need.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Resource {
    #[strum(serialize = "action")]
    Action,
    #[strum(serialize = "bonus action")]
    BonusAction,
    #[strum(serialize = "attack")]
    Attack,
    #[strum(serialize = "movement")]
    Movement,
    #[strum(serialize = "reaction")]
    Reaction,
    #[strum(serialize = "second wind")]
    SecondWind,
}

/// Errors raised when an action breaks the rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// No combatant with this id exists in the roster.
    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    /// The actor is not conscious and cannot act.
    #[error("combatant {0} cannot act")]
    Incapacitated(CombatantId),

    /// The target cannot be attacked (ally, dead, out of reach).
    #[error("invalid target {target}: {reason}")]
    InvalidTarget {
        target: CombatantId,
        reason: &'static str,
    },

    /// Destination rejected; nothing was spent.
    #[error("illegal move to {to}: {reason}")]
    IllegalMove { to: Position, reason: MoveIssue },

    /// The actor has none of the required resource left.
    #[error("insufficient {resource}")]
    InsufficientResources { resource: Resource },
}

impl ActionError {
    pub fn invalid_target(target: CombatantId, reason: &'static str) -> Self {
        Self::InvalidTarget { target, reason }
    }

    pub fn illegal_move(to: Position, reason: MoveIssue) -> Self {
        Self::IllegalMove { to, reason }
    }

    pub fn insufficient(resource: Resource) -> Self {
        Self::InsufficientResources { resource }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            UnknownCombatant(_) => ErrorSeverity::Internal,
            InvalidTarget { .. } => ErrorSeverity::Validation,
            Incapacitated(_) | IllegalMove { .. } | InsufficientResources { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnknownCombatant(_) => "ACTION_UNKNOWN_COMBATANT",
            Incapacitated(_) => "ACTION_INCAPACITATED",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            IllegalMove { .. } => "ACTION_ILLEGAL_MOVE",
            InsufficientResources { .. } => "ACTION_INSUFFICIENT_RESOURCES",
        }
    }
}
