//! # field_pathfinding
//!
//! Shortest paths on a rectangular field of cells using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Movement is
//! 4-directional and every move costs the same. A [Grid] holds one source, one destination and any
//! number of blocked cells; [solve] returns the cells in between. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use field_pathfinding::{solve, Coord, Grid};
//!
//! let mut grid = Grid::new(3, 3)?;
//! grid.make_blocked(1, 1)?;
//! grid.update();
//! let solution = solve(&grid, Coord::new(0, 0), Coord::new(2, 2))?;
//! assert_eq!(solution.len(), 4);
//! # Ok::<(), field_pathfinding::PathError>(())
//! ```
pub mod cell;
pub mod coord;
pub mod error;
pub mod grid;
pub mod search;
pub mod solver;

pub use cell::{Cell, CellStore, Status};
pub use coord::Coord;
pub use error::PathError;
pub use grid::Grid;
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver, Solution};

/// Cost of a single move between neighbouring cells.
pub const MOVE_COST: i32 = 1;
/// Upper bound on `rows * columns` accepted by [Grid::new].
pub const MAX_CELLS: usize = 1 << 24;
/// Inline capacity for neighbourhoods, enough for the 4 von Neumann neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Shortest path from `source` to `destination` with the default [AstarSolver].
pub fn solve(grid: &Grid, source: Coord, destination: Coord) -> Result<Solution, PathError> {
    AstarSolver::new().solve(grid, source, destination)
}
