use field_pathfinding::{solve, AstarSolver, Coord, Grid, GridSolver, PathError, Status};

#[test]
fn open_five_by_five() {
    let grid = Grid::new(5, 5).unwrap();
    let solution = solve(&grid, Coord::new(0, 0), Coord::new(4, 4)).unwrap();
    assert_eq!(solution.len(), 8);
    assert_eq!(solution.interior().len(), 7);
    assert!(solution.full_path().iter().all(|p| grid.in_bounds(*p)));
    assert!(solution.is_contiguous());
}

/// Column 1 is blocked everywhere except on row 0, so every route crosses (0, 1).
#[test]
fn forced_through_gap() {
    // S.D
    // .#.
    // .#.
    let mut grid = Grid::new(3, 3).unwrap();
    grid.make_blocked(1, 1).unwrap();
    grid.make_blocked(2, 1).unwrap();
    grid.update();
    for (source, destination) in [
        (Coord::new(2, 0), Coord::new(2, 2)),
        (Coord::new(2, 2), Coord::new(0, 0)),
        (Coord::new(1, 0), Coord::new(1, 2)),
    ] {
        let solution = solve(&grid, source, destination).unwrap();
        assert!(solution.interior().contains(&Coord::new(0, 1)));
        assert!(solution
            .full_path()
            .iter()
            .all(|p| !grid.is_blocked(p.row, p.column)));
    }
}

#[test]
fn walled_in_destination() {
    let text = "\
        S....
        ..#..
        .#D#.
        ..#..
        .....";
    let mut grid: Grid = text.parse().unwrap();
    let (source, destination) = (Coord::new(0, 0), Coord::new(2, 2));
    assert_eq!(grid.source(), Some(source));
    assert_eq!(grid.destination(), Some(destination));
    let expected = Err(PathError::NoPathFound {
        from: source,
        to: destination,
    });
    // Once answered by the components, once by running the frontier dry.
    assert_eq!(grid.solve(), expected);
    grid.components_dirty = true;
    assert_eq!(solve(&grid, source, destination), expected);
}

#[test]
fn same_source_and_destination() {
    let grid: Grid = "...\n.S.\n...".parse().unwrap();
    let c = Coord::new(1, 1);
    let solution = solve(&grid, c, c).unwrap();
    assert!(solution.interior().is_empty());
    assert_eq!(solution.len(), 0);
}

#[test]
fn repeated_solve_is_stable() {
    let mut grid: Grid = "\
        S.....
        .##.#.
        ...#..
        .#...D"
        .parse()
        .unwrap();
    let first = grid.solve().unwrap();
    let second = grid.solve().unwrap();
    assert_eq!(first, second);
    // Marking the result does not change the answer.
    grid.apply_solution(&first);
    assert_eq!(grid.solve().unwrap().full_path(), first.full_path());
}

#[test]
fn length_is_symmetric() {
    let grid: Grid = "\
        ..#.....
        .##.###.
        ....#...
        ##.##.#.
        ......#."
        .parse()
        .unwrap();
    let solver = AstarSolver::new();
    let (a, b) = (Coord::new(0, 0), Coord::new(4, 7));
    let there = solver.path_length(&grid, a, b).unwrap();
    let back = solver.path_length(&grid, b, a).unwrap();
    assert_eq!(there, back);
}

/// Walks through a session the way an interactive front end drives the grid: first click sets the
/// source, second the destination, the rest block cells; then solve, draw and restart.
#[test]
fn interactive_session() {
    let mut grid = Grid::new(4, 6).unwrap();
    let clicks = [(0, 0), (3, 5), (1, 1), (1, 2), (2, 4)];
    for (row, column) in clicks {
        if !grid.has_source() {
            grid.set_source(row, column).unwrap();
        } else if !grid.has_destination() {
            grid.set_destination(row, column).unwrap();
        } else {
            grid.make_blocked(row, column).unwrap();
        }
    }
    let solution = grid.solve().unwrap();
    assert_eq!(solution.len(), 8);
    grid.apply_solution(&solution);
    for p in solution.interior() {
        assert!(grid.is_path(p.row, p.column));
    }
    assert!(grid.is_source(0, 0));
    assert!(grid.is_destination(3, 5));
    assert!(grid
        .cells()
        .iter()
        .any(|c| c.status == Status::Considering));

    grid.clear();
    assert!(!grid.has_source());
    assert!(grid.cells().iter().all(|c| c.status == Status::Open));
    assert_eq!(grid.solve(), Err(PathError::MissingEndpoint("source")));
}
