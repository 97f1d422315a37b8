//! Line-of-fire inspection between two cells.

use super::{Grid, Position};

/// Minimum length of the centre-to-centre segment inside a cell for the
/// cell to count as crossed.
const MIN_OVERLAP: f64 = 0.1;

/// Cells crossed by the segment joining the centres of `from` and `to`,
/// excluding both endpoints. Ordered by row, then column.
pub fn line_cells(from: Position, to: Position) -> Vec<Position> {
    let (ax, ay) = (f64::from(from.x) + 0.5, f64::from(from.y) + 0.5);
    let (bx, by) = (f64::from(to.x) + 0.5, f64::from(to.y) + 0.5);

    let mut cells = Vec::new();
    for y in from.y.min(to.y)..=from.y.max(to.y) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            let cell = Position::new(x, y);
            if cell == from || cell == to {
                continue;
            }
            if clipped_length((ax, ay), (bx, by), cell) >= MIN_OVERLAP {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Length of the segment `a -> b` inside the unit square of `cell`
/// (Liang-Barsky clipping).
fn clipped_length(a: (f64, f64), b: (f64, f64), cell: Position) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (min_x, min_y) = (f64::from(cell.x), f64::from(cell.y));
    let (max_x, max_y) = (min_x + 1.0, min_y + 1.0);

    let edges = [
        (-dx, a.0 - min_x),
        (dx, max_x - a.0),
        (-dy, a.1 - min_y),
        (dy, max_y - a.1),
    ];

    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return 0.0;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                enter = enter.max(t);
            } else {
                exit = exit.min(t);
            }
        }
    }

    if enter >= exit {
        return 0.0;
    }
    (exit - enter) * dx.hypot(dy)
}

/// How obstructed the line between two combatants is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Obstruction {
    /// No cell between the two. Ranged targeting scores this low.
    Adjacent,
    Heavy,
    Moderate,
    Light,
    Clear,
}

impl Obstruction {
    /// Classifies an obstruction ratio (total obstruction / crossed cells).
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.5 {
            Self::Heavy
        } else if ratio > 0.3 {
            Self::Moderate
        } else if ratio > 0.1 {
            Self::Light
        } else {
            Self::Clear
        }
    }

    /// Targeting score for a ranged attacker, 0-100.
    pub fn score(self) -> u32 {
        match self {
            Self::Adjacent => 10,
            Self::Heavy => 15,
            Self::Moderate => 30,
            Self::Light => 50,
            Self::Clear => 100,
        }
    }

    /// Armor class bonus granted to the target of a ranged attack.
    pub fn cover_bonus(self) -> i32 {
        match self {
            Self::Light => 2,
            Self::Moderate | Self::Heavy => 5,
            Self::Adjacent | Self::Clear => 0,
        }
    }

    pub fn imposes_disadvantage(self) -> bool {
        matches!(self, Self::Heavy)
    }
}

impl Grid {
    /// Classifies the line from `from` to `to`. Each occupied crossed cell
    /// adds 1 and each forest cell adds 0.5.
    pub fn obstruction(&self, from: Position, to: Position) -> Obstruction {
        let cells = line_cells(from, to);
        if cells.is_empty() {
            return Obstruction::Adjacent;
        }
        let total: f64 = cells
            .iter()
            .map(|&cell| {
                let occupied = if self.occupant(cell).is_some() { 1.0 } else { 0.0 };
                occupied + self.terrain(cell).unwrap_or_default().obstruction()
            })
            .sum();
        Obstruction::from_ratio(total / cells.len() as f64)
    }
}
