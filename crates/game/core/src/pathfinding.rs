//! Cost-aware A* over the battle grid.
//!
//! One search, two modes:
//!
//! - [`Pathfinder::cost_to`] and [`Pathfinder::route_to`]: cost (and
//!   cells) to reach one exact cell, optionally pruned by a movement budget.
//! - [`Pathfinder::approach`]: cheapest free cell next to a target, falling
//!   back to the furthest affordable cell along that path when the budget
//!   runs short.
//!
//! Steps cost 5 ft orthogonally and 7.5 ft diagonally, doubled when
//! entering a hill. The heuristic is the straight-line distance to the
//! nearest goal in feet, which never overestimates.
//!
//! All search state lives in the call; nothing is cached between searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::MovementRules;
use crate::grid::{Grid, Position};

/// Outcome of an exact-cell search.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reach {
    Reachable { cost: f64 },
    Unreachable,
}

impl Reach {
    pub fn cost(self) -> Option<f64> {
        match self {
            Reach::Reachable { cost } => Some(cost),
            Reach::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Reach::Reachable { .. })
    }
}

/// A walkable path to one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Every cell walked through, start first and destination last.
    pub cells: Vec<Position>,
    pub cost: f64,
}

impl Route {
    /// Consecutive `(from, to)` pairs along the route.
    pub fn steps(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.cells.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Where to stand to engage a target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Approach {
    pub cell: Position,
    /// Movement spent to get to `cell`.
    pub cost: f64,
    /// True when `cell` is only part of the way because the budget ran out.
    pub partial: bool,
}

/// Search-internal node, stored in a per-call arena.
#[derive(Clone, Copy, Debug)]
struct PathNode {
    position: Position,
    cost: f64,
    parent: Option<usize>,
}

/// Frontier entry; ordered so the heap pops the lowest priority first.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    priority: f64,
    cost: f64,
    position: Position,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap. Ties: deeper node first, then position.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| self.cost.total_cmp(&other.cost))
            .then_with(|| other.position.cmp(&self.position))
    }
}

/// Per-call search state.
struct Search<'g> {
    grid: &'g Grid,
    rules: &'g MovementRules,
    nodes: Vec<PathNode>,
    best: Vec<f64>,
    finalized: Vec<bool>,
    heap: BinaryHeap<Frontier>,
}

impl<'g> Search<'g> {
    fn new(grid: &'g Grid, rules: &'g MovementRules) -> Self {
        let cells = (grid.size() as usize).pow(2);
        Self {
            grid,
            rules,
            nodes: Vec::new(),
            best: vec![f64::INFINITY; cells],
            finalized: vec![false; cells],
            heap: BinaryHeap::new(),
        }
    }

    fn index(&self, position: Position) -> usize {
        position.y as usize * self.grid.size() as usize + position.x as usize
    }

    fn heuristic(&self, position: Position, goals: &[Position]) -> f64 {
        goals
            .iter()
            .map(|&goal| position.euclidean(goal))
            .fold(f64::INFINITY, f64::min)
            * self.rules.feet_per_cell()
    }

    fn push(&mut self, position: Position, cost: f64, parent: Option<usize>, goals: &[Position]) {
        let node = self.nodes.len();
        self.nodes.push(PathNode {
            position,
            cost,
            parent,
        });
        let idx = self.index(position);
        self.best[idx] = cost;
        self.heap.push(Frontier {
            priority: cost + self.heuristic(position, goals),
            cost,
            position,
            node,
        });
    }

    /// Pops the next unfinalized node and marks it final.
    fn pop(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let idx = self.index(entry.position);
            if self.finalized[idx] {
                continue;
            }
            self.finalized[idx] = true;
            return Some(entry.node);
        }
        None
    }

    /// Pushes every improvable neighbour of `node`. Occupied cells are
    /// walls; nodes above `budget` are dropped.
    fn expand(&mut self, node: usize, goals: &[Position], budget: Option<f64>) {
        let PathNode { position, cost, .. } = self.nodes[node];
        for next in self.grid.neighbors(position) {
            let idx = self.index(next);
            if self.finalized[idx] || !self.grid.is_free(next) {
                continue;
            }
            let next_cost = cost + self.grid.step_cost(position, next, self.rules);
            if budget.is_some_and(|limit| next_cost > limit) || next_cost >= self.best[idx] {
                continue;
            }
            self.push(next, next_cost, Some(node), goals);
        }
    }

    /// Nodes from `node` back to the start, start last.
    fn chain(&self, node: usize) -> impl Iterator<Item = &PathNode> {
        let nodes = &self.nodes;
        std::iter::successors(Some(&nodes[node]), move |n| n.parent.map(move |p| &nodes[p]))
    }
}

/// Searches a grid for one mover. The mover's own cell is always allowed as
/// a start even though it is occupied.
pub struct Pathfinder<'a> {
    grid: &'a Grid,
    rules: &'a MovementRules,
}

impl<'a> Pathfinder<'a> {
    pub fn new(grid: &'a Grid, rules: &'a MovementRules) -> Self {
        Self { grid, rules }
    }

    /// Cost of moving from `start` to exactly `destination`.
    ///
    /// With a budget, paths costing more are pruned, so the answer is either
    /// a cost no greater than the budget or unreachable.
    pub fn cost_to(&self, start: Position, destination: Position, budget: Option<f64>) -> Reach {
        match self.route_to(start, destination, budget) {
            Some(route) => Reach::Reachable { cost: route.cost },
            None => Reach::Unreachable,
        }
    }

    /// Cheapest path from `start` to exactly `destination`, under the same
    /// pruning as [`cost_to`](Self::cost_to).
    pub fn route_to(&self, start: Position, destination: Position, budget: Option<f64>) -> Option<Route> {
        if !self.grid.contains(start) || !self.grid.contains(destination) {
            return None;
        }
        if start == destination {
            return Some(Route {
                cells: vec![start],
                cost: 0.0,
            });
        }
        if !self.grid.is_free(destination) {
            return None;
        }

        let goals = [destination];
        let mut search = Search::new(self.grid, self.rules);
        search.push(start, 0.0, None, &goals);
        while let Some(node) = search.pop() {
            let PathNode { position, cost, .. } = search.nodes[node];
            if position == destination {
                let mut cells: Vec<Position> = search.chain(node).map(|n| n.position).collect();
                cells.reverse();
                return Some(Route { cells, cost });
            }
            search.expand(node, &goals, budget);
        }
        None
    }

    /// Best free cell adjacent to `target`, reached from `start`.
    ///
    /// Returns `None` when no adjacent cell can be reached at all. When the
    /// cheapest one costs more than `budget`, returns the furthest cell on
    /// its path that fits the budget, flagged `partial`.
    pub fn approach(&self, start: Position, target: Position, budget: Option<f64>) -> Option<Approach> {
        if !self.grid.contains(start) {
            return None;
        }
        if start.is_adjacent(target) {
            return Some(Approach {
                cell: start,
                cost: 0.0,
                partial: false,
            });
        }

        let goals: Vec<Position> = self.grid.free_neighbors(target).into_iter().collect();
        if goals.is_empty() {
            return None;
        }

        let mut search = Search::new(self.grid, self.rules);
        search.push(start, 0.0, None, &goals);
        let mut remaining = goals.len();
        let mut best: Option<usize> = None;
        while remaining > 0 {
            let Some(node) = search.pop() else { break };
            let PathNode { position, cost, .. } = search.nodes[node];
            if goals.contains(&position) {
                remaining -= 1;
                if best.is_none_or(|b| cost < search.nodes[b].cost) {
                    best = Some(node);
                }
            }
            search.expand(node, &goals, None);
        }

        let goal = best?;
        let full = search.nodes[goal];
        match budget {
            Some(limit) if full.cost > limit => {
                let stop = search.chain(goal).find(|n| n.cost <= limit)?;
                Some(Approach {
                    cell: stop.position,
                    cost: stop.cost,
                    partial: true,
                })
            }
            _ => Some(Approach {
                cell: full.position,
                cost: full.cost,
                partial: false,
            }),
        }
    }
}
