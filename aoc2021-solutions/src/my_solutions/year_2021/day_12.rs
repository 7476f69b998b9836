use std::collections::HashMap;

use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 12, tags = ["graph", "dp"])]
pub struct Solver;

type CaveId = usize;

/// Small caves are tracked in a `u64` visited mask
const MAX_CAVES: usize = u64::BITS as usize;

#[derive(Debug)]
pub struct CaveSystem {
    neighbours: Vec<Vec<CaveId>>,
    small: Vec<bool>,
    start: CaveId,
    end: CaveId,
}

fn is_small(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_lowercase())
}

fn intern<'a>(
    name: &'a str,
    line_no: usize,
    ids: &mut HashMap<&'a str, CaveId>,
    names: &mut Vec<&'a str>,
    neighbours: &mut Vec<Vec<CaveId>>,
) -> anyhow::Result<CaveId> {
    ensure!(
        name.chars().all(|c| c.is_ascii_alphabetic()),
        "(line {}) invalid cave name {:?}",
        line_no,
        name
    );
    Ok(*ids.entry(name).or_insert_with(|| {
        names.push(name);
        neighbours.push(Vec::new());
        names.len() - 1
    }))
}

fn parse_caves(input: &str) -> anyhow::Result<CaveSystem> {
    let mut ids: HashMap<&str, CaveId> = HashMap::new();
    let mut names: Vec<&str> = Vec::new();
    let mut neighbours: Vec<Vec<CaveId>> = Vec::new();

    for (line_idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (a, b) = line
            .split_once('-')
            .filter(|(a, b)| !a.is_empty() && !b.is_empty() && !b.contains('-'))
            .ok_or_else(|| anyhow!("(line {}) expected `a-b`, got {:?}", line_idx + 1, line))?;

        let a = intern(a, line_idx + 1, &mut ids, &mut names, &mut neighbours)?;
        let b = intern(b, line_idx + 1, &mut ids, &mut names, &mut neighbours)?;
        ensure!(a != b, "(line {}) cave {:?} linked to itself", line_idx + 1, line);
        if !neighbours[a].contains(&b) {
            neighbours[a].push(b);
            neighbours[b].push(a);
        }
    }

    ensure!(names.len() <= MAX_CAVES, "{} caves, at most {} supported", names.len(), MAX_CAVES);
    let start = *ids.get("start").ok_or_else(|| anyhow!("no `start` cave"))?;
    let end = *ids.get("end").ok_or_else(|| anyhow!("no `end` cave"))?;
    let small: Vec<bool> = names.iter().map(|name| is_small(name)).collect();

    // Two adjacent big caves would allow infinitely many paths
    for (a, links) in neighbours.iter().enumerate() {
        if let Some(&b) = links.iter().find(|&&b| !small[a] && !small[b]) {
            bail!("big caves {:?} and {:?} are adjacent", names[a], names[b]);
        }
    }

    Ok(CaveSystem {
        neighbours,
        small,
        start,
        end,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = CaveSystem;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_caves(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Where a partial path stands: current cave, small caves seen so far,
/// and whether the one allowed revisit has been spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PathState {
    cave: CaveId,
    visited: u64,
    revisited: bool,
}

/// Number of ways to finish a path from a given state
struct PathCount<'c> {
    caves: &'c CaveSystem,
}

impl DpProblem<PathState, u64> for PathCount<'_> {
    fn deps(&self, state: &PathState) -> Vec<PathState> {
        if state.cave == self.caves.end {
            return vec![];
        }
        self.caves.neighbours[state.cave]
            .iter()
            .filter(|&&next| next != self.caves.start)
            .filter_map(|&next| {
                if !self.caves.small[next] {
                    return Some(PathState { cave: next, ..*state });
                }
                let bit = 1u64 << next;
                if state.visited & bit == 0 {
                    Some(PathState {
                        cave: next,
                        visited: state.visited | bit,
                        revisited: state.revisited,
                    })
                } else if !state.revisited {
                    Some(PathState {
                        cave: next,
                        visited: state.visited,
                        revisited: true,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    fn compute(&self, state: &PathState, deps: Vec<u64>) -> u64 {
        if state.cave == self.caves.end {
            1
        } else {
            deps.iter().sum()
        }
    }
}

fn count_paths(caves: &CaveSystem, allow_revisit: bool) -> u64 {
    let paths: DpCache<PathState, u64, _, _> =
        DpCache::with_problem(HashMapBackend::new(), PathCount { caves });
    let count = paths.get(&PathState {
        cave: caves.start,
        visited: 1 << caves.start,
        revisited: !allow_revisit,
    });
    tracing::debug!(states = paths.into_backend().len(), allow_revisit, "counted cave paths");
    count
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SMALL: &str = "start-A\nstart-b\nA-c\nA-b\nb-d\nA-end\nb-end\n";

    const MEDIUM: &str = "\
dc-end
HN-start
start-kj
dc-start
dc-HN
LN-dc
HN-end
kj-sa
kj-HN
kj-dc
";

    const LARGE: &str = "\
fs-end
he-DX
fs-he
start-DX
pj-DX
end-zg
zg-sl
zg-pj
pj-he
RW-he
fs-DX
pj-RW
zg-RW
start-pj
he-WI
zg-he
pj-fs
start-RW
";

    fn answers(input: &str) -> (String, String) {
        let mut shared = Solver::parse(input).unwrap();
        (
            Solver::solve_part(&mut shared, 1).unwrap(),
            Solver::solve_part(&mut shared, 2).unwrap(),
        )
    }

    #[test]
    fn test_examples() {
        assert_eq!(answers(SMALL), ("10".to_string(), "36".to_string()));
        assert_eq!(answers(MEDIUM), ("19".to_string(), "103".to_string()));
        assert_eq!(answers(LARGE), ("226".to_string(), "3509".to_string()));
    }

    #[test]
    fn test_end_is_terminal() {
        // Paths stop at `end` even though it has further links
        assert_eq!(answers("start-end\nend-a\n"), ("1".to_string(), "1".to_string()));
    }

    #[test]
    fn test_rejects_bad_systems() {
        assert!(Solver::parse("start-A\nA-B\nB-end\n").is_err());
        assert!(Solver::parse("start-a\na-b\n").is_err());
        assert!(matches!(
            Solver::parse("start-end\na_b-end\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
        assert!(Solver::parse("start-end\nnodash\n").is_err());
    }
}
