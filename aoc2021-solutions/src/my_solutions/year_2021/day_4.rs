use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 4, tags = ["bingo", "simulation"])]
pub struct Solver;

const SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct Board {
    cells: [[u32; SIZE]; SIZE],
    marked: [[bool; SIZE]; SIZE],
}

impl Board {
    fn new(cells: [[u32; SIZE]; SIZE]) -> Self {
        Self {
            cells,
            marked: [[false; SIZE]; SIZE],
        }
    }

    /// Mark `number` and report whether that completed a row or column
    fn mark(&mut self, number: u32) -> bool {
        let mut won = false;
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.cells[r][c] == number && !self.marked[r][c] {
                    self.marked[r][c] = true;
                    won |= self.marked[r].iter().all(|&m| m)
                        || (0..SIZE).all(|row| self.marked[row][c]);
                }
            }
        }
        won
    }

    fn unmarked_sum(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .zip(self.marked.iter().flatten())
            .filter(|&(_, &marked)| !marked)
            .map(|(&value, _)| value)
            .sum()
    }
}

#[derive(Debug)]
pub struct SharedData {
    numbers: Vec<u32>,
    boards: Vec<Board>,
    win_scores: Option<Vec<u32>>,
}

fn parse_board(lines: &[(usize, &str)]) -> anyhow::Result<Board> {
    let (first_line, _) = lines[0];
    ensure!(
        lines.len() == SIZE,
        "(line {}) board has {} rows, expected {}",
        first_line,
        lines.len(),
        SIZE
    );

    let mut cells = [[0u32; SIZE]; SIZE];
    for (row, &(line_no, line)) in cells.iter_mut().zip(lines) {
        let values = line
            .split_whitespace()
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("(line {}) invalid board row", line_no))?;
        ensure!(
            values.len() == SIZE,
            "(line {}) row has {} numbers, expected {}",
            line_no,
            values.len(),
            SIZE
        );
        row.copy_from_slice(&values);
    }
    Ok(Board::new(cells))
}

fn parse_input(input: &str) -> anyhow::Result<SharedData> {
    let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (_, header) = lines.next().ok_or_else(|| anyhow!("missing called numbers"))?;
    let numbers = header
        .split(',')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .context("(line 1) invalid called numbers")?;

    let boards = lines
        .chunk_by(|(_, line)| line.is_empty())
        .into_iter()
        .filter(|(blank, _)| !blank)
        .map(|(_, group)| parse_board(&group.collect::<Vec<_>>()))
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(!boards.is_empty(), "no boards");

    Ok(SharedData {
        numbers,
        boards,
        win_scores: None,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_input(input).map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

/// Play the whole game once; scores of the boards in the order they win
fn win_scores(shared: &mut SharedData) -> &[u32] {
    shared.win_scores.get_or_insert_with(|| {
        let mut boards = shared.boards.clone();
        let mut done = vec![false; boards.len()];
        let mut scores = Vec::with_capacity(boards.len());
        for &number in &shared.numbers {
            for (board, done) in boards.iter_mut().zip(done.iter_mut()) {
                if !*done && board.mark(number) {
                    *done = true;
                    scores.push(board.unmarked_sum() * number);
                }
            }
        }
        scores
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        win_scores(shared)
            .first()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::failed("no board ever wins"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        win_scores(shared)
            .last()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::failed("no board ever wins"))
    }
}
