use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 9, tags = ["grid", "flood-fill"])]
pub struct Solver;

const WALL: u8 = 9;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_digits(input)
    }
}

fn low_points(grid: &Grid<u8>) -> impl Iterator<Item = Pos> + '_ {
    grid.positions()
        .filter(move |&pos| grid.neighbours4(pos).all(|n| grid[n] > grid[pos]))
}

/// Size of the region around `start` bounded by walls and the border.
/// Zero when an earlier fill already claimed `start`.
fn basin_size(grid: &Grid<u8>, start: Pos, seen: &mut Grid<bool>) -> usize {
    if seen[start] {
        return 0;
    }
    let mut stack = vec![start];
    seen[start] = true;
    let mut size = 0;
    while let Some(pos) = stack.pop() {
        size += 1;
        for next in grid.neighbours4(pos) {
            if grid[next] != WALL && !seen[next] {
                seen[next] = true;
                stack.push(next);
            }
        }
    }
    size
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let risk: u32 = low_points(shared).map(|pos| shared[pos] as u32 + 1).sum();
        Ok(risk.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = shared.map(|_| false);
        let sizes: Vec<usize> = low_points(shared)
            .map(|pos| basin_size(shared, pos, &mut seen))
            .sorted_unstable_by(|a, b| b.cmp(a))
            .take(3)
            .collect();
        Ok(sizes.iter().product::<usize>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
2199943210
3987894921
9856789892
8767896789
9899965678
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(low_points(&shared).count(), 4);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "15");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1134");
    }

    #[test]
    fn test_fewer_than_three_basins() {
        let mut shared = Solver::parse("191\n999\n191\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "8");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");

        let mut shared = Solver::parse("19\n91\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");

        let mut shared = Solver::parse("9999\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }

    #[test]
    fn test_shared_basin_is_counted_once() {
        // Both low points sit in one basin of 3
        let grid = Grid::parse_digits("151\n999\n").unwrap();
        assert_eq!(low_points(&grid).count(), 2);
        let mut seen = grid.map(|_| false);
        let sizes: Vec<_> = low_points(&grid)
            .map(|pos| basin_size(&grid, pos, &mut seen))
            .collect();
        assert_eq!(sizes, vec![3, 0]);
    }
}
