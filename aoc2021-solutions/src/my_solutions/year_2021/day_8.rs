use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 8, tags = ["deduction", "bitmask"])]
pub struct Solver;

/// Lit segments `a..=g` as bits 0..=6
type Segments = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    patterns: [Segments; 10],
    outputs: [Segments; 4],
}

fn parse_segments(word: &str) -> anyhow::Result<Segments> {
    word.bytes().try_fold(0u8, |mask, b| {
        ensure!((b'a'..=b'g').contains(&b), "invalid segment {:?} in {:?}", b as char, word);
        let bit = 1 << (b - b'a');
        ensure!(mask & bit == 0, "segment {:?} repeated in {:?}", b as char, word);
        Ok(mask | bit)
    })
}

fn parse_words<const N: usize>(text: &str) -> anyhow::Result<[Segments; N]> {
    let masks = text
        .split_whitespace()
        .map(parse_segments)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let count = masks.len();
    masks
        .try_into()
        .map_err(|_| anyhow!("expected {} patterns, got {}", N, count))
}

fn parse_display(line: &str) -> anyhow::Result<Display> {
    let (patterns, outputs) = line
        .split_once('|')
        .ok_or_else(|| anyhow!("missing `|` separator"))?;
    Ok(Display {
        patterns: parse_words(patterns)?,
        outputs: parse_words(outputs)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Display>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_display(line).map_err(|e| ParseError::at_line(line_idx + 1, e))
            })
            .collect()
    }
}

fn lit(mask: Segments) -> u32 {
    mask.count_ones()
}

fn contains(outer: Segments, inner: Segments) -> bool {
    outer & inner == inner
}

/// Work out which pattern is which digit, indexed by digit
fn deduce(patterns: &[Segments; 10]) -> Option<[Segments; 10]> {
    let unique = |len: u32| patterns.iter().copied().find(|&p| lit(p) == len);
    let one = unique(2)?;
    let four = unique(4)?;
    let seven = unique(3)?;
    let eight = unique(7)?;

    let mut digits = [0u8; 10];
    digits[1] = one;
    digits[4] = four;
    digits[7] = seven;
    digits[8] = eight;

    for &p in patterns.iter().filter(|&&p| lit(p) == 6) {
        let digit = if contains(p, four) {
            9
        } else if contains(p, one) {
            0
        } else {
            6
        };
        digits[digit] = p;
    }
    let six = digits[6];
    for &p in patterns.iter().filter(|&&p| lit(p) == 5) {
        let digit = if contains(p, one) {
            3
        } else if contains(six, p) {
            5
        } else {
            2
        };
        digits[digit] = p;
    }

    // Every digit must have been claimed by exactly one pattern
    let mut claimed = digits;
    claimed.sort_unstable();
    let mut expected = *patterns;
    expected.sort_unstable();
    (claimed == expected).then_some(digits)
}

fn decode(display: &Display) -> Option<u32> {
    let digits = deduce(&display.patterns)?;
    display.outputs.iter().try_fold(0, |value, &output| {
        let digit = digits.iter().position(|&d| d == output)?;
        Some(value * 10 + digit as u32)
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let easy = shared
            .iter()
            .flat_map(|d| d.outputs.iter())
            .filter(|&&o| matches!(lit(o), 2 | 3 | 4 | 7))
            .count();
        Ok(easy.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(i, display)| {
                decode(display).ok_or_else(|| {
                    SolveError::failed(format!("display {} cannot be decoded", i + 1))
                })
            })
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}
