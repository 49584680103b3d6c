use itertools::Itertools;
use log::{debug, info};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::coord::Coord;
use crate::error::PathError;
use crate::grid::Grid;
use crate::search::{SearchContext, SearchOutcome};
use crate::N_SMALLVEC_SIZE;

pub mod astar;
pub mod dijkstra;

/// A found path together with the cells the search finalised on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    path: Vec<Coord>,
    trace_back: Vec<Coord>,
    cost: i32,
    finalized: Vec<Coord>,
}

impl Solution {
    fn new(path: Vec<Coord>, cost: i32, finalized: Vec<Coord>) -> Solution {
        let trace_back = if path.len() <= 2 {
            Vec::new()
        } else {
            path[1..path.len() - 1].iter().rev().copied().collect()
        };
        Solution {
            path,
            trace_back,
            cost,
            finalized,
        }
    }
    /// The whole path in travel order, from the source to the destination, both included.
    pub fn full_path(&self) -> &[Coord] {
        &self.path
    }
    /// The cells strictly between source and destination as traced back through the parent map:
    /// the destination's parent first, the source's successor last. Empty when the endpoints
    /// coincide or touch.
    pub fn interior(&self) -> &[Coord] {
        &self.trace_back
    }
    /// Number of moves.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn cost(&self) -> i32 {
        self.cost
    }
    /// Cells taken off the frontier and expanded, in order. Never contains the destination.
    pub fn finalized(&self) -> &[Coord] {
        &self.finalized
    }
    /// Every consecutive pair of cells is one axis-aligned step apart.
    pub fn is_contiguous(&self) -> bool {
        self.path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
    }
}

pub trait GridSolver {
    /// Estimated cost from `p1` to `p2`.
    fn heuristic(&self, p1: &Coord, p2: &Coord) -> i32;

    fn successors(&self, grid: &Grid, node: &Coord) -> SmallVec<[(Coord, i32); N_SMALLVEC_SIZE]> {
        grid.neighborhood_points_and_cost(node)
    }

    /// Computes a shortest path from `source` to `destination`. Both must lie on the grid and
    /// must not be blocked. An unreachable destination gives [PathError::NoPathFound].
    fn solve(&self, grid: &Grid, source: Coord, destination: Coord) -> Result<Solution, PathError> {
        self.solve_interruptible(grid, source, destination, || false)
    }

    /// Like [solve](Self::solve), but gives up with [PathError::Cancelled] once `cancel` is set.
    fn solve_cancellable(
        &self,
        grid: &Grid,
        source: Coord,
        destination: Coord,
        cancel: &AtomicBool,
    ) -> Result<Solution, PathError> {
        self.solve_interruptible(grid, source, destination, || {
            cancel.load(Ordering::Relaxed)
        })
    }

    /// `interrupted` is polled once before every frontier extraction.
    fn solve_interruptible<FI>(
        &self,
        grid: &Grid,
        source: Coord,
        destination: Coord,
        interrupted: FI,
    ) -> Result<Solution, PathError>
    where
        FI: FnMut() -> bool,
    {
        grid.check_endpoint(source)?;
        grid.check_endpoint(destination)?;
        let no_path = PathError::NoPathFound {
            from: source,
            to: destination,
        };
        // Up-to-date components rule out unreachable pairs without flooding the grid.
        if !grid.components_dirty && grid.unreachable(&source, &destination) {
            info!("{} is not reachable from {}", destination, source);
            return Err(no_path);
        }
        let mut ct: SearchContext<Coord, i32> =
            SearchContext::with_capacity(grid.cells().len());
        let outcome = ct.astar(
            &source,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &destination),
            |point| *point == destination,
            interrupted,
        );
        match outcome {
            SearchOutcome::Solved { path, cost } => {
                debug!(
                    "Found path of cost {} from {} to {} after {} expansions",
                    cost,
                    source,
                    destination,
                    ct.finalized().count()
                );
                Ok(Solution::new(
                    path,
                    cost,
                    ct.finalized().copied().collect(),
                ))
            }
            SearchOutcome::Exhausted => Err(no_path),
            SearchOutcome::Cancelled => Err(PathError::Cancelled),
        }
    }

    /// The number of moves on a shortest path.
    fn path_length(
        &self,
        grid: &Grid,
        source: Coord,
        destination: Coord,
    ) -> Result<usize, PathError> {
        self.solve(grid, source, destination).map(|s| s.len())
    }
}
