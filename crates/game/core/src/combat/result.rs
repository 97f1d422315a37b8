//! Attack outcomes.

use crate::combatant::{CombatantId, VitalityStatus};
use crate::dice::D20Roll;
use crate::grid::Obstruction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
    Critical,
}

impl AttackOutcome {
    pub fn is_hit(self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    pub fn is_critical(self) -> bool {
        matches!(self, AttackOutcome::Critical)
    }
}

/// Everything that happened during one resolved attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: CombatantId,
    pub defender: CombatantId,
    pub outcome: AttackOutcome,
    pub roll: D20Roll,
    pub total: i32,
    /// Armor class the roll was compared against, cover included.
    pub target_ac: i32,
    /// Damage that reached the defender after reductions.
    pub damage: i32,
    pub new_status: VitalityStatus,
    /// Line-of-fire class for ranged attacks.
    pub cover: Option<Obstruction>,
    pub protected_by: Option<CombatantId>,
    /// Ally that intercepted, and how much damage it soaked.
    pub intercepted_by: Option<(CombatantId, i32)>,
}

impl AttackReport {
    pub fn hit(&self) -> bool {
        self.outcome.is_hit()
    }

    pub fn critical(&self) -> bool {
        self.outcome.is_critical()
    }
}
