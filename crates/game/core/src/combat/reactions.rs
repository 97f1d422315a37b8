//! Who may react, and to what.
//!
//! These only pick the reactor. Spending the reaction and applying its
//! effect is the resolver's job.

use crate::combatant::{Combatant, CombatantId, FightingStyle};
use crate::grid::Position;
use crate::roster::Roster;

fn ready(c: &Combatant) -> bool {
    c.is_alive() && c.resources.reactions > 0
}

/// Adjacent ally of `defender` able to impose disadvantage with a shield.
pub(super) fn find_protector(roster: &Roster, defender: CombatantId) -> Option<CombatantId> {
    let at = roster.get(defender)?.position;
    roster
        .allies_of(defender)
        .find(|ally| {
            ready(ally)
                && ally.has_style(FightingStyle::Protection)
                && ally.off_hand.has_shield()
                && ally.position.is_adjacent(at)
        })
        .map(|ally| ally.id)
}

/// Adjacent ally of `defender` able to soak part of the damage.
pub(super) fn find_interceptor(roster: &Roster, defender: CombatantId) -> Option<CombatantId> {
    let at = roster.get(defender)?.position;
    roster
        .allies_of(defender)
        .find(|ally| {
            ready(ally)
                && ally.has_style(FightingStyle::Interception)
                && ally.position.is_adjacent(at)
        })
        .map(|ally| ally.id)
}

/// Enemies of `mover` whose melee reach covers `from` but not `to`.
pub(super) fn opportunity_attackers(
    roster: &Roster,
    mover: CombatantId,
    from: Position,
    to: Position,
    feet_per_cell: f64,
) -> Vec<CombatantId> {
    roster
        .enemies_of(mover)
        .filter(|enemy| {
            let weapon = &enemy.main_hand;
            ready(enemy)
                && !weapon.is_ranged()
                && weapon.reaches(enemy.position, from, feet_per_cell)
                && !weapon.reaches(enemy.position, to, feet_per_cell)
        })
        .map(|enemy| enemy.id)
        .collect()
}
