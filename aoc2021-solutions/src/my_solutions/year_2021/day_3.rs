use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use rayon::prelude::*;

use crate::utils::bit_trie::{Bit, BitTrie, ResolveMode, TrieError, bits_to_rating, parse_bits};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 3, tags = ["binary", "trie", "parallel"])]
pub struct Solver;

/// Diagnostic report: equal-width rows of bits
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    width: usize,
    rows: Vec<Vec<Bit>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Report;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rows: Vec<Vec<Bit>> = Vec::new();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = parse_bits(line).map_err(|e| ParseError::at_line(line_idx + 1, e))?;
            if let Some(first) = rows.first()
                && first.len() != row.len()
            {
                let e = TrieError::InconsistentWidth {
                    expected: first.len(),
                    found: row.len(),
                };
                return Err(ParseError::at_line(line_idx + 1, e));
            }
            rows.push(row);
        }

        let width = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| ParseError::MissingData("no report lines".to_string()))?;
        if width > u64::BITS as usize {
            return Err(ParseError::InvalidFormat(format!(
                "rows are {} bits wide, at most {} supported",
                width,
                u64::BITS
            )));
        }
        Ok(Report { width, rows })
    }
}

fn rating(bits: &[Bit]) -> Result<u64, SolveError> {
    bits_to_rating(bits)
        .ok_or_else(|| SolveError::failed(format!("{} bits do not fit a u64", bits.len())))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rows = &shared.rows;
        let gamma_bits: Vec<Bit> = (0..shared.width)
            .into_par_iter()
            .map(|col| {
                let ones = rows.iter().filter(|row| row[col] == Bit::One).count();
                if ones * 2 > rows.len() { Bit::One } else { Bit::Zero }
            })
            .collect();

        let gamma = rating(&gamma_bits)?;
        let mask = u64::MAX >> (u64::BITS as usize - shared.width);
        let epsilon = !gamma & mask;
        tracing::debug!(gamma, epsilon, "power consumption rates");
        Ok((gamma as u128 * epsilon as u128).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut trie = BitTrie::new();
        for row in &shared.rows {
            trie.insert_bits(row).map_err(SolveError::failed)?;
        }

        let oxygen = rating(&trie.resolve(ResolveMode::Most).map_err(SolveError::failed)?)?;
        let co2 = rating(&trie.resolve(ResolveMode::Least).map_err(SolveError::failed)?)?;
        tracing::debug!(oxygen, co2, "life support ratings");
        Ok((oxygen as u128 * co2 as u128).to_string())
    }
}
