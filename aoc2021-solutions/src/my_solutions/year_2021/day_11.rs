use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 11, tags = ["grid", "simulation"])]
pub struct Solver;

const STEPS: usize = 100;
/// Give up looking for a synchronised flash after this many steps
const SYNC_SEARCH_LIMIT: usize = 10_000;
const FLASH_AT: u8 = 10;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_digits(input)
    }
}

/// Advance one step and return how many octopuses flashed
fn step(grid: &mut Grid<u8>) -> usize {
    let mut pending = Vec::new();
    for pos in grid.positions() {
        grid[pos] += 1;
        if grid[pos] == FLASH_AT {
            pending.push(pos);
        }
    }

    // Each octopus is pushed exactly once, when its energy first reaches FLASH_AT
    let mut flashes = 0;
    while let Some(pos) = pending.pop() {
        flashes += 1;
        for next in grid.neighbours8(pos) {
            if grid[next] < FLASH_AT {
                grid[next] += 1;
                if grid[next] == FLASH_AT {
                    pending.push(next);
                }
            }
        }
    }

    for energy in grid.values_mut() {
        if *energy >= FLASH_AT {
            *energy = 0;
        }
    }
    flashes
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        let flashes: usize = (0..STEPS).map(|_| step(&mut grid)).sum();
        Ok(flashes.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        (1..=SYNC_SEARCH_LIMIT)
            .find(|_| step(&mut grid) == grid.len())
            .map(|n| n.to_string())
            .ok_or_else(|| {
                SolveError::failed(format!(
                    "no synchronised flash within {} steps",
                    SYNC_SEARCH_LIMIT
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
5483143223
2745854711
5264556173
6141336146
6357385478
4167524645
2176841721
6882881134
4846848554
5283751526
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1656");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "195");
    }

    #[test]
    fn test_small_cascade() {
        let mut grid = Grid::parse_digits("11111\n19991\n19191\n19991\n11111\n").unwrap();
        assert_eq!(step(&mut grid), 9);
        assert_eq!(grid, Grid::parse_digits("34543\n40004\n50005\n40004\n34543\n").unwrap());
        assert_eq!(step(&mut grid), 0);
        assert_eq!(grid, Grid::parse_digits("45654\n51115\n61116\n51115\n45654\n").unwrap());
    }

    #[test]
    fn test_already_synchronised() {
        let mut shared = Solver::parse("99\n99\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }
}
