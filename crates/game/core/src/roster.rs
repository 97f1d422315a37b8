//! All combatants in an encounter, split into two teams.
//!
//! Records are never removed: a dead combatant leaves its team list but its
//! record stays addressable by id for post-combat stats.

use crate::combatant::{Combatant, CombatantId, Team};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    combatants: Vec<Combatant>,
    team_one: Vec<CombatantId>,
    team_two: Vec<CombatantId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant to its team and assigns its id.
    pub fn add(&mut self, mut combatant: Combatant) -> CombatantId {
        let id = CombatantId(self.combatants.len() as u32);
        combatant.id = id;
        self.team_mut(combatant.team).push(id);
        self.combatants.push(combatant);
        id
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.0 as usize)
    }

    /// Members still standing on `team` (not yet removed as dead).
    pub fn team(&self, team: Team) -> &[CombatantId] {
        match team {
            Team::One => &self.team_one,
            Team::Two => &self.team_two,
        }
    }

    fn team_mut(&mut self, team: Team) -> &mut Vec<CombatantId> {
        match team {
            Team::One => &mut self.team_one,
            Team::Two => &mut self.team_two,
        }
    }

    /// Drops `id` from its team list. Returns false if it was not listed.
    pub fn remove_from_team(&mut self, id: CombatantId) -> bool {
        let Some(team) = self.get(id).map(|c| c.team) else {
            return false;
        };
        let members = self.team_mut(team);
        let before = members.len();
        members.retain(|&member| member != id);
        members.len() != before
    }

    pub fn is_eliminated(&self, team: Team) -> bool {
        self.team(team).is_empty()
    }

    /// Every record, including the dead.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Listed members of the other team, in id order.
    pub fn enemies_of(&self, id: CombatantId) -> impl Iterator<Item = &Combatant> {
        let team = self.get(id).map(|c| c.team.opponent());
        team.into_iter()
            .flat_map(move |team| self.team(team).iter())
            .filter_map(move |&other| self.get(other))
    }

    /// Listed members of the same team, excluding `id`.
    pub fn allies_of(&self, id: CombatantId) -> impl Iterator<Item = &Combatant> {
        let team = self.get(id).map(|c| c.team);
        team.into_iter()
            .flat_map(move |team| self.team(team).iter())
            .filter(move |&&other| other != id)
            .filter_map(move |&other| self.get(other))
    }
}
