use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 10, tags = ["stack", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// First closing bracket that does not match
    Corrupted(char),
    /// Closers still owed, innermost first
    Incomplete(Vec<char>),
    Complete,
}

fn closer(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

fn check(line: &str) -> Result<Line, String> {
    let mut expected = Vec::new();
    for ch in line.chars() {
        if let Some(close) = closer(ch) {
            expected.push(close);
            continue;
        }
        if !matches!(ch, ')' | ']' | '}' | '>') {
            return Err(format!("unexpected character {:?}", ch));
        }
        // A closer with nothing open is as corrupt as a mismatched one
        if expected.pop() != Some(ch) {
            return Ok(Line::Corrupted(ch));
        }
    }
    expected.reverse();
    Ok(if expected.is_empty() {
        Line::Complete
    } else {
        Line::Incomplete(expected)
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Line>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                check(line.trim()).map_err(|e| ParseError::at_line(line_idx + 1, e))
            })
            .collect()
    }
}

fn error_score(ch: char) -> u64 {
    match ch {
        ')' => 3,
        ']' => 57,
        '}' => 1197,
        _ => 25137,
    }
}

fn completion_score(missing: &[char]) -> u64 {
    missing.iter().fold(0, |score, ch| {
        score * 5
            + match ch {
                ')' => 1,
                ']' => 2,
                '}' => 3,
                _ => 4,
            }
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let score: u64 = shared
            .iter()
            .filter_map(|line| match line {
                Line::Corrupted(ch) => Some(error_score(*ch)),
                _ => None,
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut scores: Vec<u64> = shared
            .iter()
            .filter_map(|line| match line {
                Line::Incomplete(missing) => Some(completion_score(missing)),
                _ => None,
            })
            .collect();
        if scores.is_empty() {
            return Err(SolveError::failed("no incomplete lines"));
        }
        // Odd count in well-formed input; even counts take the upper middle
        let mid = scores.len() / 2;
        let (_, median, _) = scores.select_nth_unstable(mid);
        Ok(median.to_string())
    }
}
