use crate::coord::Coord;

/// The role a cell currently plays. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Open,
    Blocked,
    Source,
    Destination,
    Path,
    Considering,
}

impl Status {
    /// ASCII symbol used by the [Grid](crate::grid::Grid) `Display` and `FromStr` impls.
    pub fn symbol(&self) -> char {
        match self {
            Status::Open => '.',
            Status::Blocked => '#',
            Status::Source => 'S',
            Status::Destination => 'D',
            Status::Path => '*',
            Status::Considering => '+',
        }
    }

    pub fn from_symbol(c: char) -> Option<Status> {
        match c {
            '.' => Some(Status::Open),
            '#' => Some(Status::Blocked),
            'S' => Some(Status::Source),
            'D' => Some(Status::Destination),
            '*' => Some(Status::Path),
            '+' => Some(Status::Considering),
            _ => None,
        }
    }
}

/// A single grid cell. The coordinate is fixed at creation, only the status changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    pub status: Status,
}

impl Cell {
    fn new(coord: Coord) -> Cell {
        Cell {
            coord,
            status: Status::Open,
        }
    }
    pub fn coord(&self) -> Coord {
        self.coord
    }
    pub fn reset(&mut self) {
        self.status = Status::Open;
    }
}

/// Row-major storage for every cell of a `rows x columns` grid. All cells are created up front, so
/// a coordinate always resolves to the same record.
///
/// Indexing out of range is a caller bug and panics.
#[derive(Clone, Debug)]
pub struct CellStore {
    rows: i32,
    columns: i32,
    cells: Vec<Cell>,
}

impl CellStore {
    /// Dimensions are validated by the [Grid](crate::grid::Grid) before reaching this point.
    pub(crate) fn new(rows: i32, columns: i32) -> CellStore {
        debug_assert!(rows > 0 && columns > 0);
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| Cell::new(Coord::new(row, column))))
            .collect();
        CellStore {
            rows,
            columns,
            cells,
        }
    }
    pub fn rows(&self) -> i32 {
        self.rows
    }
    pub fn columns(&self) -> i32 {
        self.columns
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.column >= 0 && coord.row < self.rows && coord.column < self.columns
    }
    /// Flat row-major index of a coordinate.
    pub fn get_ix(&self, coord: Coord) -> usize {
        assert!(
            self.in_bounds(coord),
            "{} is outside of the {}x{} cell store",
            coord,
            self.rows,
            self.columns
        );
        (coord.row * self.columns + coord.column) as usize
    }
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.get_ix(coord)]
    }
    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let ix = self.get_ix(coord);
        &mut self.cells[ix]
    }
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        if self.in_bounds(coord) {
            Some(self.cell(coord))
        } else {
            None
        }
    }
    pub fn status(&self, coord: Coord) -> Status {
        self.cell(coord).status
    }
    pub fn set_status(&mut self, coord: Coord, status: Status) {
        self.cell_mut(coord).status = status;
    }
    /// Returns the cell at `(row, column)` to [Status::Open].
    pub fn reset(&mut self, row: i32, column: i32) {
        self.cell_mut(Coord::new(row, column)).reset();
    }
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
