use field_pathfinding::{Coord, Grid};

// In this example a path is found on a 5x7 grid with shape
//  _______
// |S      |
// |#### # |
// |   #   |
// | # # ##|
// |   #  D|
//  _______
// where
// - # marks a blocked cell
// - S marks the source
// - D marks the destination
//
// Cells expanded by the search are drawn as + and the path as *.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut grid = Grid::new(5, 7)?;
    grid.set_source(0, 0)?;
    grid.set_destination(4, 6)?;
    for (row, column) in [
        (1, 0),
        (1, 1),
        (1, 2),
        (1, 3),
        (1, 5),
        (2, 3),
        (3, 1),
        (3, 3),
        (3, 5),
        (3, 6),
        (4, 3),
    ] {
        grid.make_blocked(row, column)?;
    }
    println!("{}", grid);
    let solution = grid.solve()?;
    grid.apply_solution(&solution);
    println!("{}", grid);
    println!("Path of {} moves:", solution.len());
    for p in solution.full_path() {
        println!("{}", p);
    }
    let unreachable = Coord::new(4, 0);
    if let Err(e) = field_pathfinding::solve(&grid, Coord::new(0, 0), unreachable) {
        println!("{}", e);
    }
    Ok(())
}
