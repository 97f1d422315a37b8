//! Building an encounter: teams, grid, placement and initiative.

use std::cmp::Reverse;

use skirmish_core::{
    Ability, CombatLog, Combatant, CombatantId, Grid, PcgRng, Position, RngSource, Roster,
    RulesConfig, Team,
};
use tracing::{debug, info};

use super::Encounter;
use crate::error::SetupError;
use crate::events::{EncounterEvent, forward_log};

/// Smallest grid the clustered placement can work with.
pub const MIN_GRID_SIZE: u32 = 8;

/// Random tries around a team centre before falling back to the nearest
/// free cell.
const PLACEMENT_ATTEMPTS: usize = 32;

/// Collects teams and options, then rolls everything needed to start.
pub struct EncounterBuilder<R: RngSource = PcgRng> {
    rules: RulesConfig,
    rng: R,
    grid: Option<Grid>,
    team_one: Vec<Combatant>,
    team_two: Vec<Combatant>,
    keep_positions: bool,
}

impl<R: RngSource> EncounterBuilder<R> {
    pub fn new(rules: RulesConfig, rng: R) -> Self {
        Self {
            rules,
            rng,
            grid: None,
            team_one: Vec::new(),
            team_two: Vec::new(),
            keep_positions: false,
        }
    }

    /// Uses `grid` instead of generating one from the rules.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn team(mut self, team: Team, members: impl IntoIterator<Item = Combatant>) -> Self {
        let list = match team {
            Team::One => &mut self.team_one,
            Team::Two => &mut self.team_two,
        };
        list.extend(members.into_iter().map(|c| c.with_team(team)));
        self
    }

    /// Splits `pool` between the teams, each member joining whichever team
    /// has the lower level total so far. Ties go to team one.
    pub fn balanced(mut self, pool: impl IntoIterator<Item = Combatant>) -> Self {
        let total = |members: &[Combatant]| members.iter().map(|c| c.level).sum::<u32>();
        let (mut one, mut two) = (total(&self.team_one), total(&self.team_two));
        for member in pool {
            let level = member.level;
            if one <= two {
                self.team_one.push(member.with_team(Team::One));
                one += level;
            } else {
                self.team_two.push(member.with_team(Team::Two));
                two += level;
            }
        }
        self
    }

    /// Places everyone on the cell already in their record instead of
    /// scattering teams around random centres.
    pub fn keep_positions(mut self) -> Self {
        self.keep_positions = true;
        self
    }

    pub fn start(self) -> Result<Encounter<R>, SetupError> {
        let Self {
            rules,
            mut rng,
            grid,
            team_one,
            team_two,
            keep_positions,
        } = self;

        if team_one.is_empty() {
            return Err(SetupError::EmptyTeam(Team::One));
        }
        if team_two.is_empty() {
            return Err(SetupError::EmptyTeam(Team::Two));
        }
        let mut grid = match grid {
            Some(grid) => grid,
            None => Grid::generate(&rules.grid, &mut rng),
        };
        if grid.size() < MIN_GRID_SIZE {
            return Err(SetupError::GridTooSmall {
                size: grid.size(),
                min: MIN_GRID_SIZE,
            });
        }

        let mut roster = Roster::new();
        let one: Vec<CombatantId> = team_one.into_iter().map(|c| roster.add(c)).collect();
        let two: Vec<CombatantId> = team_two.into_iter().map(|c| roster.add(c)).collect();

        if keep_positions {
            for &id in one.iter().chain(&two) {
                place_as_given(&mut grid, &roster, id)?;
            }
        } else {
            let size = grid.size() as i32;
            let one_centre = Position::new(rng.range(2, size - 3), rng.range(size - 6, size - 2));
            let two_centre = Position::new(rng.range(2, size - 3), rng.range(1, 5));
            for (members, centre) in [(&two, two_centre), (&one, one_centre)] {
                for &id in members {
                    let cell = scatter(&grid, centre, &mut rng)
                        .ok_or_else(|| SetupError::NoRoom {
                            name: roster.get(id).map(|c| c.name.clone()).unwrap_or_default(),
                        })?;
                    place(&mut grid, &mut roster, id, cell)?;
                }
            }
        }

        let mut log = CombatLog::new();
        let mut order: Vec<CombatantId> = Vec::with_capacity(roster.len());
        for combatant in roster.iter_mut() {
            let roll = rng.roll_d20();
            combatant.initiative = roll as i32 + combatant.modifier(Ability::Dexterity);
            combatant.resources.reset_round();
            log.push(format!(
                "{} rolls initiative: {}",
                combatant.name, combatant.initiative
            ));
            order.push(combatant.id);
        }
        order.sort_by_key(|&id| Reverse(roster.get(id).map_or(i32::MIN, |c| c.initiative)));

        let mut events = vec![EncounterEvent::Started {
            order: order.clone(),
        }];
        forward_log(&mut log, &mut events);
        info!(
            combatants = order.len(),
            grid = grid.size(),
            "encounter started"
        );

        Ok(Encounter {
            rules,
            grid,
            roster,
            rng,
            log,
            events,
            cursor: order.len(),
            order,
            round: 0,
            active: None,
            result: None,
        })
    }
}

/// Starts an encounter between two teams on a generated grid, seeded dice
/// included. The initiative order is available from the result.
pub fn start_encounter(
    team_one: impl IntoIterator<Item = Combatant>,
    team_two: impl IntoIterator<Item = Combatant>,
    rules: RulesConfig,
    seed: u64,
) -> Result<Encounter<PcgRng>, SetupError> {
    EncounterBuilder::new(rules, PcgRng::new(seed))
        .team(Team::One, team_one)
        .team(Team::Two, team_two)
        .start()
}

fn place_as_given(grid: &mut Grid, roster: &Roster, id: CombatantId) -> Result<(), SetupError> {
    let Some(combatant) = roster.get(id) else {
        return Ok(());
    };
    grid.place(id, combatant.position)
        .map_err(|source| SetupError::Placement {
            name: combatant.name.clone(),
            position: combatant.position,
            source,
        })
}

fn place(
    grid: &mut Grid,
    roster: &mut Roster,
    id: CombatantId,
    cell: Position,
) -> Result<(), SetupError> {
    let Some(combatant) = roster.get_mut(id) else {
        return Ok(());
    };
    combatant.position = cell;
    debug!(name = %combatant.name, %cell, "placed");
    grid.place(id, cell).map_err(|source| SetupError::Placement {
        name: combatant.name.clone(),
        position: cell,
        source,
    })
}

/// A free cell within one step of `centre`, or failing that the free cell
/// closest to it.
fn scatter(grid: &Grid, centre: Position, rng: &mut impl RngSource) -> Option<Position> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let cell = centre.offset(rng.range(-1, 1), rng.range(-1, 1));
        if grid.is_free(cell) {
            return Some(cell);
        }
    }
    grid.cells()
        .filter(|&cell| grid.is_free(cell))
        .min_by_key(|&cell| (cell.chebyshev(centre), cell.y, cell.x))
}
