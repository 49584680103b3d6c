use crate::{coord::Coord, solver::GridSolver};

/// Uniform-cost search: A* without a heuristic.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Coord, _: &Coord) -> i32 {
        0
    }
}
