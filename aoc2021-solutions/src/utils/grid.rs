//! Rectangular row-major grid of small values

use std::ops::{Index, IndexMut};

use aoc_solver::ParseError;

/// `(row, col)`
pub type Pos = (usize, usize);

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const SURROUNDING: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
}

impl Grid<u8> {
    /// Parse lines of decimal digits. Blank lines are skipped; every other
    /// line must have the same length.
    pub fn parse_digits(input: &str) -> Result<Self, ParseError> {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut rows = 0;

        for (i, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match cols {
                None => cols = Some(line.len()),
                Some(c) if c != line.len() => {
                    return Err(ParseError::at_line(
                        i + 1,
                        format!("row has {} cells, expected {}", line.len(), c),
                    ));
                }
                Some(_) => {}
            }
            for ch in line.chars() {
                let digit = ch
                    .to_digit(10)
                    .ok_or_else(|| ParseError::at_line(i + 1, format!("not a digit: {:?}", ch)))?;
                cells.push(digit as u8);
            }
            rows += 1;
        }

        let cols = cols.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self { cells, rows, cols })
    }
}

impl<T> Grid<T> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Up, left, right, down; clipped at the border
    pub fn neighbours4(&self, pos: Pos) -> impl Iterator<Item = Pos> + use<T> {
        self.offsets(pos, &ORTHOGONAL)
    }

    /// Including diagonals; clipped at the border
    pub fn neighbours8(&self, pos: Pos) -> impl Iterator<Item = Pos> + use<T> {
        self.offsets(pos, &SURROUNDING)
    }

    fn offsets(
        &self,
        (r, c): Pos,
        deltas: &'static [(isize, isize)],
    ) -> impl Iterator<Item = Pos> + use<T> {
        let (rows, cols) = (self.rows, self.cols);
        deltas.iter().filter_map(move |&(dr, dc)| {
            let nr = r.checked_add_signed(dr).filter(|&nr| nr < rows)?;
            let nc = c.checked_add_signed(dc).filter(|&nc| nc < cols)?;
            Some((nr, nc))
        })
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, (r, c): Pos) -> &T {
        assert!(r < self.rows && c < self.cols, "({r}, {c}) outside grid");
        &self.cells[r * self.cols + c]
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, (r, c): Pos) -> &mut T {
        assert!(r < self.rows && c < self.cols, "({r}, {c}) outside grid");
        &mut self.cells[r * self.cols + c]
    }
}
