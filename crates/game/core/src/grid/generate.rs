//! Random terrain layout.

use super::{Grid, Position, Terrain};
use crate::config::GridRules;
use crate::dice::RngSource;

impl Grid {
    /// Builds a grid and grows a forest patch, then a hill patch, outward
    /// from the centre by random king-move expansion.
    ///
    /// Hills never overwrite forest; the hill patch may pass through forest
    /// cells to keep growing.
    pub fn generate(rules: &GridRules, rng: &mut (impl RngSource + ?Sized)) -> Self {
        let mut grid = Grid::new(rules.size);
        let cells = (rules.size as usize) * (rules.size as usize);
        let forest = fraction_of(cells, rules.forest_fraction);
        let hills = fraction_of(cells, rules.hill_fraction);

        grid.grow_patch(Terrain::Forest, forest, rng);
        grid.grow_patch(Terrain::Hill, hills, rng);
        grid
    }

    /// Converts up to `target` plain cells into `terrain`, starting at the
    /// centre and expanding through any cell already in the patch.
    fn grow_patch(&mut self, terrain: Terrain, target: usize, rng: &mut (impl RngSource + ?Sized)) {
        if target == 0 || self.size == 0 {
            return;
        }

        let centre = Position::new(self.size as i32 / 2, self.size as i32 / 2);
        let mut visited = vec![false; self.terrain.len()];
        let mut open = vec![centre];
        let mut converted = 0;
        if let Some(idx) = self.index(centre) {
            visited[idx] = true;
            converted += self.convert(centre, terrain) as usize;
        }

        while converted < target && !open.is_empty() {
            let pick = rng.range(0, open.len() as i32 - 1) as usize;
            let from = open[pick];
            let candidates: Vec<Position> = self
                .neighbors(from)
                .into_iter()
                .filter(|&p| self.index(p).is_some_and(|idx| !visited[idx]))
                .collect();
            if candidates.is_empty() {
                open.swap_remove(pick);
                continue;
            }
            let next = candidates[rng.range(0, candidates.len() as i32 - 1) as usize];
            if let Some(idx) = self.index(next) {
                visited[idx] = true;
            }
            converted += self.convert(next, terrain) as usize;
            open.push(next);
        }
    }

    /// Turns a plain cell into `terrain`; other terrain is left alone.
    fn convert(&mut self, position: Position, terrain: Terrain) -> bool {
        match self.terrain(position) {
            Some(Terrain::Plain) => self.set_terrain(position, terrain),
            _ => false,
        }
    }
}

fn fraction_of(cells: usize, fraction: f64) -> usize {
    (cells as f64 * fraction.clamp(0.0, 1.0)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::PcgRng;

    #[test]
    fn generates_requested_terrain_share() {
        let rules = GridRules::default();
        let grid = Grid::generate(&rules, &mut PcgRng::new(5));
        assert_eq!(grid.size(), 40);
        assert_eq!(grid.count_terrain(Terrain::Forest), 320);
        assert_eq!(grid.count_terrain(Terrain::Hill), 160);
    }

    #[test]
    fn patches_start_at_centre() {
        let rules = GridRules {
            size: 9,
            forest_fraction: 0.1,
            hill_fraction: 0.0,
        };
        let grid = Grid::generate(&rules, &mut PcgRng::new(1));
        assert_eq!(grid.terrain(Position::new(4, 4)), Some(Terrain::Forest));
        assert_eq!(grid.count_terrain(Terrain::Hill), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let rules = GridRules {
            size: 12,
            ..GridRules::default()
        };
        let a = Grid::generate(&rules, &mut PcgRng::new(99));
        let b = Grid::generate(&rules, &mut PcgRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_fractions_fill_without_looping() {
        let rules = GridRules {
            size: 4,
            forest_fraction: 0.75,
            hill_fraction: 1.0,
        };
        let grid = Grid::generate(&rules, &mut PcgRng::new(3));
        assert_eq!(grid.count_terrain(Terrain::Forest), 12);
        assert_eq!(grid.count_terrain(Terrain::Hill), 4);
    }
}
