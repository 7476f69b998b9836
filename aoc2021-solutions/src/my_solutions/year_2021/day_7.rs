use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::dp_cache::{DpCache, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 7, tags = ["crabs", "math", "dp"])]
pub struct Solver;

/// Crab positions, sorted ascending
#[derive(Debug)]
pub struct Crabs {
    positions: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Crabs;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (line, text) = input
            .lines()
            .enumerate()
            .find(|(_, l)| !l.trim().is_empty())
            .ok_or_else(|| ParseError::MissingData("no crab positions".to_string()))?;

        let mut positions = text
            .trim()
            .split(',')
            .map(|n| {
                n.trim()
                    .parse::<u64>()
                    .map_err(|e| ParseError::at_line(line + 1, format!("{:?}: {}", n, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        positions.sort_unstable();
        Ok(Crabs { positions })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Total absolute distance is minimised at the median
        let median = shared.positions[shared.positions.len() / 2];
        let fuel: u64 = shared.positions.iter().map(|&p| p.abs_diff(median)).sum();
        Ok(fuel.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let positions = &shared.positions;
        let (min, max) = (positions[0], positions[positions.len() - 1]);

        // Moving n steps costs 1 + 2 + ... + n
        let triangle = DpCache::new(
            VecBackend::with_capacity((max - min + 1) as usize),
            |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
            |n: &usize, deps: Vec<u64>| deps.first().map_or(0, |prev| prev + *n as u64),
        );
        for distance in 0..=(max - min) as usize {
            triangle.get(&distance);
        }
        let cost_at = |target: u64| -> u64 {
            positions
                .iter()
                .map(|&p| triangle.get(&(p.abs_diff(target) as usize)))
                .sum()
        };

        // The optimum lies within half a step of the mean
        let mean = positions.iter().sum::<u64>() / positions.len() as u64;
        let fuel = [mean, mean + 1]
            .into_iter()
            .filter(|&target| target <= max)
            .map(cost_at)
            .min()
            .ok_or_else(|| SolveError::failed("no candidate alignment position"))?;
        Ok(fuel.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "16,1,2,0,4,2,7,1,2,14\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "37");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "168");
    }

    #[test]
    fn test_single_crab() {
        let mut shared = Solver::parse("42").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "0");
    }

    #[test]
    fn test_matches_exhaustive_search() {
        let input = "3,9,27,1,1,50,8,8,13";
        let mut shared = Solver::parse(input).unwrap();
        let positions = shared.positions.clone();
        let tri = |n: u64| n * (n + 1) / 2;
        let best = (0..=50u64)
            .map(|t| positions.iter().map(|&p| tri(p.abs_diff(t))).sum::<u64>())
            .min()
            .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), best.to_string());
    }

    #[test]
    fn test_bad_position() {
        assert!(matches!(
            Solver::parse("\n1,2,x"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
    }
}
