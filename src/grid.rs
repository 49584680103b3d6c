use core::fmt;
use core::str::FromStr;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellStore, Status};
use crate::coord::Coord;
use crate::error::PathError;
use crate::solver::{astar::AstarSolver, GridSolver, Solution};
use crate::{MAX_CELLS, MOVE_COST, N_SMALLVEC_SIZE};

/// [Grid] owns the cells of a fixed-size field together with handles to the current source and
/// destination. It also maintains a [UnionFind] over 4-connected passable cells so that obviously
/// unreachable queries can be answered without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: CellStore,
    source: Option<Coord>,
    destination: Option<Coord>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Creates a grid with every cell [Status::Open] and no source or destination. Both dimensions
    /// must be positive and the cell count may not exceed [MAX_CELLS].
    pub fn new(rows: i32, columns: i32) -> Result<Grid, PathError> {
        let too_large = rows
            .checked_mul(columns)
            .map_or(true, |n| n as usize > MAX_CELLS);
        if rows <= 0 || columns <= 0 || too_large {
            return Err(PathError::InvalidDimensions { rows, columns });
        }
        let mut grid = Grid {
            cells: CellStore::new(rows, columns),
            source: None,
            destination: None,
            components: UnionFind::new(0),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> i32 {
        self.cells.rows()
    }
    pub fn columns(&self) -> i32 {
        self.cells.columns()
    }
    pub fn cells(&self) -> &CellStore {
        &self.cells
    }
    pub fn cell(&self, row: i32, column: i32) -> Option<&Cell> {
        self.cells.get(Coord::new(row, column))
    }
    pub fn status(&self, row: i32, column: i32) -> Option<Status> {
        self.cell(row, column).map(|c| c.status)
    }
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.cells.in_bounds(coord)
    }
    /// In bounds and not blocked. Path and considering marks do not obstruct movement.
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.cells.status(coord) != Status::Blocked
    }

    fn checked(&self, row: i32, column: i32) -> Result<Coord, PathError> {
        let coord = Coord::new(row, column);
        if self.in_bounds(coord) {
            Ok(coord)
        } else {
            Err(PathError::OutOfBounds {
                coord,
                rows: self.rows(),
                columns: self.columns(),
            })
        }
    }

    /// Checks that a coordinate can serve as a search endpoint.
    pub fn check_endpoint(&self, coord: Coord) -> Result<(), PathError> {
        self.checked(coord.row, coord.column)?;
        if self.cells.status(coord) == Status::Blocked {
            return Err(PathError::BlockedEndpoint(coord));
        }
        Ok(())
    }

    /// Changes a status while keeping the components up to date. Blocking a cell may split a
    /// component, which is only repaired by regenerating, so the components are flagged as dirty.
    fn set_status(&mut self, coord: Coord, status: Status) {
        let was_passable = self.is_passable(coord);
        self.cells.set_status(coord, status);
        if status == Status::Blocked {
            if was_passable {
                self.components_dirty = true;
            }
        } else if !was_passable {
            let ix = self.cells.get_ix(coord);
            for n in coord.neumann_neighborhood() {
                if self.is_passable(n) {
                    self.components.union(ix, self.cells.get_ix(n));
                }
            }
        }
    }

    /// Marks a cell as the source and remembers it. The previous source, if any, keeps its status.
    pub fn set_source(&mut self, row: i32, column: i32) -> Result<(), PathError> {
        let coord = self.checked(row, column)?;
        self.set_status(coord, Status::Source);
        self.source = Some(coord);
        Ok(())
    }
    /// Marks a cell as the destination and remembers it. The previous destination, if any, keeps
    /// its status.
    pub fn set_destination(&mut self, row: i32, column: i32) -> Result<(), PathError> {
        let coord = self.checked(row, column)?;
        self.set_status(coord, Status::Destination);
        self.destination = Some(coord);
        Ok(())
    }
    pub fn source(&self) -> Option<Coord> {
        self.source
    }
    pub fn destination(&self) -> Option<Coord> {
        self.destination
    }
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }

    pub fn make_blocked(&mut self, row: i32, column: i32) -> Result<(), PathError> {
        let coord = self.checked(row, column)?;
        self.set_status(coord, Status::Blocked);
        Ok(())
    }
    pub fn mark_path(&mut self, row: i32, column: i32) -> Result<(), PathError> {
        let coord = self.checked(row, column)?;
        self.set_status(coord, Status::Path);
        Ok(())
    }
    pub fn mark_considering(&mut self, row: i32, column: i32) -> Result<(), PathError> {
        let coord = self.checked(row, column)?;
        self.set_status(coord, Status::Considering);
        Ok(())
    }

    fn has_status(&self, row: i32, column: i32, status: Status) -> bool {
        self.status(row, column) == Some(status)
    }
    pub fn is_open(&self, row: i32, column: i32) -> bool {
        self.has_status(row, column, Status::Open)
    }
    pub fn is_blocked(&self, row: i32, column: i32) -> bool {
        self.has_status(row, column, Status::Blocked)
    }
    pub fn is_source(&self, row: i32, column: i32) -> bool {
        self.has_status(row, column, Status::Source)
    }
    pub fn is_destination(&self, row: i32, column: i32) -> bool {
        self.has_status(row, column, Status::Destination)
    }
    pub fn is_path(&self, row: i32, column: i32) -> bool {
        self.has_status(row, column, Status::Path)
    }
    pub fn is_considering(&self, row: i32, column: i32) -> bool {
        self.has_status(row, column, Status::Considering)
    }

    /// Forgets the source and destination handles. Cell statuses are untouched, use
    /// [reset_cell](Self::reset_cell) or [clear](Self::clear) for those.
    pub fn reset(&mut self) {
        self.source = None;
        self.destination = None;
    }
    /// Returns a single cell to [Status::Open].
    pub fn reset_cell(&mut self, row: i32, column: i32) -> Result<(), PathError> {
        let coord = self.checked(row, column)?;
        self.set_status(coord, Status::Open);
        Ok(())
    }
    /// Restarts the puzzle: every cell open, no source or destination.
    pub fn clear(&mut self) {
        info!("Clearing {}x{} grid", self.rows(), self.columns());
        for row in 0..self.rows() {
            for column in 0..self.columns() {
                self.cells.reset(row, column);
            }
        }
        self.reset();
        self.generate_components();
    }

    /// Open cells expanded by the search become [Status::Considering] and the interior of the path
    /// becomes [Status::Path]. Source and destination cells keep their status.
    pub fn apply_solution(&mut self, solution: &Solution) {
        for &coord in solution.finalized() {
            if self.in_bounds(coord) && self.cells.status(coord) == Status::Open {
                self.cells.set_status(coord, Status::Considering);
            }
        }
        for &coord in solution.interior() {
            if self.in_bounds(coord)
                && matches!(
                    self.cells.status(coord),
                    Status::Open | Status::Considering | Status::Path
                )
            {
                self.cells.set_status(coord, Status::Path);
            }
        }
    }

    /// The passable 4-neighbours of `pos` in north, west, south, east order with their move cost.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Coord,
    ) -> SmallVec<[(Coord, i32); N_SMALLVEC_SIZE]> {
        pos.neumann_neighborhood()
            .into_iter()
            .filter(|p| self.is_passable(*p))
            .map(|p| (p, MOVE_COST))
            .collect()
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: &Coord) -> usize {
        self.components.find(self.cells.get_ix(*coord))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Coord, goal: &Coord) -> bool {
        if self.is_passable(*start) && self.is_passable(*goal) {
            !self
                .components
                .equiv(self.cells.get_ix(*start), self.cells.get_ix(*goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours into components.
    pub fn generate_components(&mut self) {
        debug!("Generating components for {}x{} grid", self.rows(), self.columns());
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for row in 0..self.rows() {
            for column in 0..self.columns() {
                let coord = Coord::new(row, column);
                if !self.is_passable(coord) {
                    continue;
                }
                let ix = self.cells.get_ix(coord);
                for n in [coord.south(), coord.east()] {
                    if self.is_passable(n) {
                        self.components.union(ix, self.cells.get_ix(n));
                    }
                }
            }
        }
    }

    /// Searches between the stored source and destination with the default [AstarSolver].
    /// Stale components are regenerated first.
    pub fn solve(&mut self) -> Result<Solution, PathError> {
        let source = self.source.ok_or(PathError::MissingEndpoint("source"))?;
        let destination = self
            .destination
            .ok_or(PathError::MissingEndpoint("destination"))?;
        self.update();
        AstarSolver::new().solve(self, source, destination)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.columns())
                .map(|column| self.cells.status(Coord::new(row, column)).symbol())
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the same alphabet [Display](fmt::Display) writes. Blank lines are skipped and all
/// remaining lines must have the same length.
impl FromStr for Grid {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect::<Vec<_>>();
        let Some(&(_, first)) = lines.first() else {
            return Err(PathError::Parse {
                line: 0,
                reason: "no grid rows".to_owned(),
            });
        };
        let columns = first.chars().count() as i32;
        let mut grid = Grid::new(lines.len() as i32, columns)?;
        for (row, &(line_no, line)) in lines.iter().enumerate() {
            if line.chars().count() as i32 != columns {
                return Err(PathError::Parse {
                    line: line_no,
                    reason: format!("expected {} columns", columns),
                });
            }
            for (column, c) in line.chars().enumerate() {
                let (row, column) = (row as i32, column as i32);
                match Status::from_symbol(c) {
                    Some(Status::Open) => {}
                    Some(Status::Blocked) => grid.make_blocked(row, column)?,
                    Some(Status::Source) => grid.set_source(row, column)?,
                    Some(Status::Destination) => grid.set_destination(row, column)?,
                    Some(Status::Path) => grid.mark_path(row, column)?,
                    Some(Status::Considering) => grid.mark_considering(row, column)?,
                    None => {
                        return Err(PathError::Parse {
                            line: line_no,
                            reason: format!("unknown cell symbol {:?}", c),
                        })
                    }
                }
            }
        }
        grid.update();
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 3).unwrap_err(),
            PathError::InvalidDimensions {
                rows: 0,
                columns: 3
            }
        );
        assert!(Grid::new(3, -1).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert_eq!(
            Grid::new(70_000, 70_000).unwrap_err(),
            PathError::InvalidDimensions {
                rows: 70_000,
                columns: 70_000
            }
        );
        assert!(Grid::new(i32::MAX, 2).is_err());
        assert!(Grid::new(1, MAX_CELLS as i32 + 1).is_err());
    }

    #[test]
    fn new_grid_is_one_component() {
        let grid = Grid::new(2, 3).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Coord::new(0, 0), &Coord::new(1, 2)));
    }

    #[test]
    fn roles_and_predicates() {
        let mut grid = Grid::new(3, 4).unwrap();
        assert!(grid.is_open(2, 3));
        assert!(!grid.has_source());
        grid.set_source(0, 0).unwrap();
        grid.set_destination(2, 3).unwrap();
        grid.make_blocked(1, 1).unwrap();
        assert_eq!(grid.source(), Some(Coord::new(0, 0)));
        assert_eq!(grid.destination(), Some(Coord::new(2, 3)));
        assert!(grid.is_source(0, 0));
        assert!(grid.is_destination(2, 3));
        assert!(grid.is_blocked(1, 1));
        assert!(!grid.is_open(1, 1));
        // Out of range reads are simply false.
        assert!(!grid.is_open(3, 0));
        assert_eq!(
            grid.make_blocked(0, 4),
            Err(PathError::OutOfBounds {
                coord: Coord::new(0, 4),
                rows: 3,
                columns: 4
            })
        );
    }

    #[test]
    fn repeated_roles_overwrite_handle() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.make_blocked(1, 1).unwrap();
        grid.set_source(0, 0).unwrap();
        grid.set_source(1, 1).unwrap();
        assert_eq!(grid.source(), Some(Coord::new(1, 1)));
        // The old cell keeps its status, the blocked cell was overwritten.
        assert!(grid.is_source(0, 0));
        assert!(grid.is_source(1, 1));
    }

    #[test]
    fn reset_only_forgets_handles() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_source(0, 0).unwrap();
        grid.set_destination(1, 1).unwrap();
        grid.reset();
        assert_eq!(grid.source(), None);
        assert_eq!(grid.destination(), None);
        assert!(grid.is_source(0, 0));
        grid.reset_cell(0, 0).unwrap();
        assert!(grid.is_open(0, 0));
        grid.clear();
        assert!(grid.cells().iter().all(|c| c.status == Status::Open));
    }

    #[test]
    fn components_follow_walls() {
        // S#.
        // .#.
        // .#D
        let mut grid: Grid = "S#.\n.#.\n.#D".parse().unwrap();
        let s = Coord::new(0, 0);
        let d = Coord::new(2, 2);
        assert!(grid.unreachable(&s, &d));
        grid.reset_cell(1, 1).unwrap();
        assert!(grid.reachable(&s, &d));
        grid.make_blocked(1, 1).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(grid.unreachable(&s, &d));
        assert_ne!(grid.get_component(&s), grid.get_component(&d));
    }

    #[test]
    fn display_and_parse_agree() {
        let text = "S.#\n*+.\n..D\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert!(grid.is_path(1, 0));
        assert!(grid.is_considering(1, 1));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "".parse::<Grid>(),
            Err(PathError::Parse { line: 0, .. })
        ));
        assert!(matches!(
            "...\n..\n".parse::<Grid>(),
            Err(PathError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            "..x".parse::<Grid>(),
            Err(PathError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn neighbourhood_skips_walls_and_edges() {
        let grid: Grid = "#..\n...\n...".parse().unwrap();
        let n = grid.neighborhood_points_and_cost(&Coord::new(0, 1));
        assert_eq!(
            n.as_slice(),
            &[(Coord::new(1, 1), MOVE_COST), (Coord::new(0, 2), MOVE_COST)]
        );
    }

    #[test]
    fn solve_requires_endpoints() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.solve(), Err(PathError::MissingEndpoint("source")));
        grid.set_source(0, 0).unwrap();
        assert_eq!(grid.solve(), Err(PathError::MissingEndpoint("destination")));
        grid.set_destination(1, 1).unwrap();
        let solution = grid.solve().unwrap();
        assert_eq!(solution.len(), 2);
        grid.apply_solution(&solution);
        assert_eq!(
            grid.cells()
                .iter()
                .filter(|c| c.status == Status::Path)
                .count(),
            1
        );
        assert!(grid.is_source(0, 0));
        assert!(grid.is_destination(1, 1));
    }
}
