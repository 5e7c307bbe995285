pub mod text;

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use rand::Rng;

use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Board shape and cell adjacency (the eight surrounding cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn check(&self, cell: Cell) -> Result<(), BoardError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Cell::new(r, c)))
    }

    /// In-bounds neighbours in row-major order.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut out = Vec::with_capacity(8);
        for r in cell.row.saturating_sub(1)..=cell.row + 1 {
            for c in cell.col.saturating_sub(1)..=cell.col + 1 {
                let n = Cell::new(r, c);
                if n != cell && self.contains(n) {
                    out.push(n);
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// A newly uncovered safe cell and its neighbouring mine count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revelation {
    pub cell: Cell,
    pub clue: usize,
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    mines: BTreeSet<Cell>,
    counts: Vec<usize>,
    revealed: BTreeSet<Cell>,
    status: GameStatus,
}

impl Board {
    pub fn new<I>(rows: usize, cols: usize, mines: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let grid = Grid::new(rows, cols);
        let mines = mines.into_iter().collect::<BTreeSet<_>>();
        let mut counts = vec![0usize; grid.len()];
        for &mine in &mines {
            grid.check(mine)?;
            for n in grid.neighbors(mine) {
                counts[n.row * cols + n.col] += 1;
            }
        }
        // nothing left to uncover
        let status = if mines.len() == grid.len() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        };
        Ok(Self {
            grid,
            mines,
            counts,
            revealed: BTreeSet::new(),
            status,
        })
    }

    /// Places `mines` mines uniformly at random.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        mines: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let total = rows * cols;
        if mines > total {
            return Err(BoardError::TooManyMines { mines, rows, cols });
        }
        let picked = rand::seq::index::sample(rng, total, mines)
            .into_iter()
            .map(|i| Cell::new(i / cols, i % cols));
        Self::new(rows, cols, picked)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.revealed.contains(&cell)
    }

    pub fn unrevealed_count(&self) -> usize {
        self.grid.len() - self.revealed.len()
    }

    /// Neighbouring mine count, visible only once the cell is revealed.
    pub fn clue(&self, cell: Cell) -> Option<usize> {
        if self.revealed.contains(&cell) && !self.is_mine(cell) {
            Some(self.count_at(cell))
        } else {
            None
        }
    }

    fn count_at(&self, cell: Cell) -> usize {
        self.counts[cell.row * self.grid.cols + cell.col]
    }

    /// Reveals `cell`, flooding through zero-count cells.
    ///
    /// Returns the safe cells uncovered by this call in the order they were
    /// reached. Revealing a mine loses the game.
    pub fn reveal(&mut self, cell: Cell) -> Result<Vec<Revelation>, BoardError> {
        self.grid.check(cell)?;
        let mut out = Vec::new();
        let mut queue = VecDeque::from([cell]);
        while let Some(next) = queue.pop_front() {
            if !self.revealed.insert(next) || self.is_mine(next) {
                continue;
            }
            let clue = self.count_at(next);
            out.push(Revelation { cell: next, clue });
            if clue == 0 {
                queue.extend(self.grid.neighbors(next));
            }
        }
        if self.is_mine(cell) {
            self.status = GameStatus::Lost;
        } else if self.unrevealed_count() == self.mines.len() {
            self.status = GameStatus::Won;
        }
        Ok(out)
    }

    /// Reveals a random covered non-mine cell; empty when none is left.
    pub fn random_reveal<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<Revelation>, BoardError> {
        let candidates = self
            .grid
            .cells()
            .filter(|c| !self.revealed.contains(c) && !self.mines.contains(c))
            .collect::<Vec<_>>();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let pick = candidates[rng.random_range(0..candidates.len())];
        self.reveal(pick)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows {
            for c in 0..self.grid.cols {
                let cell = Cell::new(r, c);
                let ch = if !self.revealed.contains(&cell) {
                    '#'
                } else if self.is_mine(cell) {
                    '*'
                } else {
                    char::from_digit(self.count_at(cell) as u32, 10).unwrap_or('?')
                };
                write!(f, "{ch}")?;
            }
            if r + 1 < self.grid.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
