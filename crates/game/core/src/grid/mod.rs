//! Square battle grid: terrain, occupancy and distances.
//!
//! The grid is fixed for an encounter. Each cell has a [`Terrain`] and at
//! most one occupant. Occupancy is the only part that changes, and only
//! through [`Grid::place`], [`Grid::vacate`] and [`Grid::relocate`].

mod generate;
mod line;

use std::fmt;

use arrayvec::ArrayVec;

use crate::combatant::CombatantId;
use crate::config::MovementRules;
use crate::error::{ActionError, MoveIssue};

pub use line::{Obstruction, line_cells};

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// The eight king-move offsets, orthogonal first.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// King-move distance in cells.
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Straight-line distance in cells.
    pub fn euclidean(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// True for the eight surrounding cells, false for `self`.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.chebyshev(other) == 1
    }

    pub fn is_diagonal_to(self, other: Self) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terrain classes that affect movement and line of fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Plain,
    /// Partial cover for ranged attacks passing through.
    Forest,
    /// Costs double to enter.
    Hill,
}

impl Terrain {
    pub fn glyph(self) -> char {
        match self {
            Terrain::Plain => '.',
            Terrain::Forest => '|',
            Terrain::Hill => '^',
        }
    }

    /// Contribution of this cell to a line's obstruction total.
    pub fn obstruction(self) -> f64 {
        match self {
            Terrain::Forest => 0.5,
            Terrain::Plain | Terrain::Hill => 0.0,
        }
    }
}

/// Square grid of `size x size` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    terrain: Vec<Terrain>,
    occupants: Vec<Option<CombatantId>>,
}

impl Grid {
    /// An all-plain grid with no occupants.
    pub fn new(size: u32) -> Self {
        let cells = (size as usize) * (size as usize);
        Self {
            size,
            terrain: vec![Terrain::Plain; cells],
            occupants: vec![None; cells],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.size as i32
            && position.y < self.size as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.size as usize + position.x as usize)
    }

    pub fn terrain(&self, position: Position) -> Option<Terrain> {
        self.index(position).map(|idx| self.terrain[idx])
    }

    /// Returns false when `position` is off the grid.
    pub fn set_terrain(&mut self, position: Position, terrain: Terrain) -> bool {
        match self.index(position) {
            Some(idx) => {
                self.terrain[idx] = terrain;
                true
            }
            None => false,
        }
    }

    pub fn count_terrain(&self, terrain: Terrain) -> usize {
        self.terrain.iter().filter(|&&t| t == terrain).count()
    }

    pub fn occupant(&self, position: Position) -> Option<CombatantId> {
        self.index(position).and_then(|idx| self.occupants[idx])
    }

    /// In bounds and unoccupied.
    pub fn is_free(&self, position: Position) -> bool {
        self.index(position)
            .is_some_and(|idx| self.occupants[idx].is_none())
    }

    pub fn place(&mut self, id: CombatantId, position: Position) -> Result<(), ActionError> {
        let idx = self
            .index(position)
            .ok_or_else(|| ActionError::illegal_move(position, MoveIssue::OutOfBounds))?;
        match self.occupants[idx] {
            Some(other) if other != id => {
                Err(ActionError::illegal_move(position, MoveIssue::Occupied))
            }
            _ => {
                self.occupants[idx] = Some(id);
                Ok(())
            }
        }
    }

    /// Clears `position`, returning whoever stood there.
    pub fn vacate(&mut self, position: Position) -> Option<CombatantId> {
        let idx = self.index(position)?;
        self.occupants[idx].take()
    }

    /// Moves the occupant of `from` to `to`. Leaves the grid untouched on error.
    pub fn relocate(&mut self, from: Position, to: Position) -> Result<CombatantId, ActionError> {
        let id = self
            .occupant(from)
            .ok_or_else(|| ActionError::illegal_move(to, MoveIssue::NoPath))?;
        if from == to {
            return Ok(id);
        }
        self.place(id, to)?;
        self.vacate(from);
        Ok(id)
    }

    /// In-bounds neighbours of `position`, orthogonal first.
    pub fn neighbors(&self, position: Position) -> ArrayVec<Position, 8> {
        Position::NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| position.offset(dx, dy))
            .filter(|&p| self.contains(p))
            .collect()
    }

    /// Neighbours of `position` that nobody stands on.
    pub fn free_neighbors(&self, position: Position) -> ArrayVec<Position, 8> {
        self.neighbors(position)
            .into_iter()
            .filter(|&p| self.is_free(p))
            .collect()
    }

    /// Cost of one king-move step from `from` into the adjacent cell `to`.
    pub fn step_cost(&self, from: Position, to: Position, rules: &MovementRules) -> f64 {
        let base = if from.is_diagonal_to(to) {
            rules.diagonal_cost
        } else {
            rules.orthogonal_cost
        };
        match self.terrain(to) {
            Some(Terrain::Hill) => base * rules.hill_multiplier,
            _ => base,
        }
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Text rendering, one row per line. `label` decides the glyph of an
    /// occupied cell.
    pub fn render(&self, label: impl Fn(CombatantId) -> char) -> String {
        let mut out = String::with_capacity(self.terrain.len() + self.size as usize);
        for position in self.cells() {
            let glyph = match self.occupant(position) {
                Some(id) => label(id),
                None => self.terrain(position).unwrap_or_default().glyph(),
            };
            out.push(glyph);
            if position.x == self.size as i32 - 1 {
                out.push('\n');
            }
        }
        out
    }
}
