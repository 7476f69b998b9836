use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 5, tags = ["geometry", "regex"])]
pub struct Solver;

const SEGMENT: &str = r"^(\d+),(\d+)\s*->\s*(\d+),(\d+)$";

type Point = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    from: Point,
    to: Point,
}

impl Segment {
    /// Horizontal or vertical; a single point is neither
    fn is_axis_aligned(&self) -> bool {
        (self.from.0 == self.to.0) != (self.from.1 == self.to.1)
    }

    /// Every covered point, ends included
    fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let dx = (self.to.0 - self.from.0).signum();
        let dy = (self.to.1 - self.from.1).signum();
        let steps = (self.to.0 - self.from.0)
            .abs()
            .max((self.to.1 - self.from.1).abs());
        let (x, y) = self.from;
        (0..=steps).map(move |i| (x + i * dx, y + i * dy))
    }
}

fn parse_segment(pattern: &Regex, line: &str) -> anyhow::Result<Segment> {
    let caps = pattern
        .captures(line)
        .ok_or_else(|| anyhow!("expected `x1,y1 -> x2,y2`, got {:?}", line))?;
    let coord = |i: usize| caps[i].parse::<i32>();
    let segment = Segment {
        from: (coord(1)?, coord(2)?),
        to: (coord(3)?, coord(4)?),
    };

    let (dx, dy) = (segment.to.0 - segment.from.0, segment.to.1 - segment.from.1);
    if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
        bail!("segment {:?} is neither axis-aligned nor 45 degrees", line);
    }
    Ok(segment)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Segment>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pattern = Regex::new(SEGMENT).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_segment(&pattern, line.trim())
                    .map_err(|e| ParseError::at_line(line_idx + 1, e))
            })
            .collect()
    }
}

fn count_overlaps<'s>(segments: impl Iterator<Item = &'s Segment>) -> usize {
    let mut covered: HashMap<Point, u32> = HashMap::new();
    for point in segments.flat_map(Segment::points) {
        *covered.entry(point).or_default() += 1;
    }
    covered.values().filter(|&&n| n >= 2).count()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_overlaps(shared.iter().filter(|s| s.is_axis_aligned())).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_overlaps(shared.iter()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
0,9 -> 5,9
8,0 -> 0,8
9,4 -> 3,4
2,2 -> 2,1
7,0 -> 7,4
6,4 -> 2,0
0,9 -> 2,9
3,4 -> 1,4
0,0 -> 8,8
5,5 -> 8,2
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.len(), 10);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "12");
    }

    #[test]
    fn test_segment_points() {
        let pattern = Regex::new(SEGMENT).unwrap();
        let segment = parse_segment(&pattern, "3,1 -> 1,3").unwrap();
        assert_eq!(segment.points().collect::<Vec<_>>(), vec![(3, 1), (2, 2), (1, 3)]);
        let single = parse_segment(&pattern, "4,4 -> 4,4").unwrap();
        assert_eq!(single.points().count(), 1);
    }

    #[test]
    fn test_single_point_counts_only_with_diagonals() {
        let mut shared = Solver::parse("2,2 -> 2,2\n0,2 -> 4,2\n").unwrap();
        assert!(!shared[0].is_axis_aligned());
        assert!(shared[1].is_axis_aligned());
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }

    #[test]
    fn test_rejects_other_slopes() {
        assert!(matches!(
            Solver::parse("0,0 -> 1,1\n0,0 -> 2,1\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
        assert!(Solver::parse("0,0 => 1,1").is_err());
    }
}
