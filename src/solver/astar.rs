use crate::{coord::Coord, solver::GridSolver, MOVE_COST};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Values above 1.0 trade optimality for fewer expansions.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSolver for AstarSolver {
    /// Manhattan distance in move costs, times the heuristic factor.
    fn heuristic(&self, p1: &Coord, p2: &Coord) -> i32 {
        ((p1.manhattan_distance(p2) * MOVE_COST) as f32 * self.heuristic_factor) as i32
    }
}
