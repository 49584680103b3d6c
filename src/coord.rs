use core::fmt;
use smallvec::{smallvec, SmallVec};

use crate::N_SMALLVEC_SIZE;

/// A (row, column) position on a [Grid](crate::grid::Grid). Rows grow downwards and columns grow
/// to the right, so `Coord::new(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub column: i32,
}

impl Coord {
    pub const fn new(row: i32, column: i32) -> Coord {
        Coord { row, column }
    }

    /// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two
    /// coordinates, which is the exact move count on an empty 4-connected grid.
    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.row - other.row).abs() + (self.column - other.column).abs()
    }

    pub fn north(&self) -> Coord {
        Coord::new(self.row - 1, self.column)
    }
    pub fn west(&self) -> Coord {
        Coord::new(self.row, self.column - 1)
    }
    pub fn south(&self) -> Coord {
        Coord::new(self.row + 1, self.column)
    }
    pub fn east(&self) -> Coord {
        Coord::new(self.row, self.column + 1)
    }

    /// The [von Neumann neighbourhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood)
    /// in north, west, south, east order. No bounds checking is done here.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        smallvec![self.north(), self.west(), self.south(), self.east()]
    }

    /// True if the two coordinates are exactly one axis-aligned step apart.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, column): (i32, i32)) -> Self {
        Coord::new(row, column)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
