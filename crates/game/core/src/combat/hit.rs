//! Hit determination.

use super::AttackOutcome;
use crate::combatant::VitalityStatus;

/// Decides whether an attack lands.
///
/// - natural 20: critical, always
/// - natural 1: miss, always
/// - otherwise a hit when `total >= armor_class`, upgraded to critical
///   against a target that is not fully conscious
pub fn check_hit(natural: u32, total: i32, armor_class: i32, target: VitalityStatus) -> AttackOutcome {
    match natural {
        20 => AttackOutcome::Critical,
        1 => AttackOutcome::Miss,
        _ if total < armor_class => AttackOutcome::Miss,
        _ if target != VitalityStatus::Alive => AttackOutcome::Critical,
        _ => AttackOutcome::Hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_twenty_always_crits() {
        assert_eq!(check_hit(20, 21, 40, VitalityStatus::Alive), AttackOutcome::Critical);
    }

    #[test]
    fn natural_one_always_misses() {
        assert_eq!(check_hit(1, 51, 5, VitalityStatus::Alive), AttackOutcome::Miss);
        assert_eq!(check_hit(1, 51, 5, VitalityStatus::Unconscious), AttackOutcome::Miss);
    }

    #[test]
    fn meeting_armor_class_hits() {
        assert_eq!(check_hit(12, 15, 15, VitalityStatus::Alive), AttackOutcome::Hit);
        assert_eq!(check_hit(11, 14, 15, VitalityStatus::Alive), AttackOutcome::Miss);
    }

    #[test]
    fn hits_on_downed_targets_are_critical() {
        assert_eq!(check_hit(12, 15, 15, VitalityStatus::Stabilized), AttackOutcome::Critical);
        assert_eq!(check_hit(2, 10, 15, VitalityStatus::Unconscious), AttackOutcome::Miss);
    }
}
