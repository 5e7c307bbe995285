pub mod knowledge;

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::board::{Cell, Grid};
use crate::error::{BoardError, ConstraintError};
use crate::sat::dpll::Limits;
use crate::solver::{Backend, IncrementalSolver};

use knowledge::{Inferences, KnowledgeBase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    pub backend: Backend,
    pub limits: Limits,
    pub memoize: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Dpll,
            limits: Limits::default(),
            memoize: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Uncover a cell proven safe.
    Reveal(Cell),
    /// Mark a cell proven to hold a mine.
    Flag(Cell),
    /// Nothing is proven; ask the game for a random safe reveal.
    Guess,
}

/// Minesweeper player driven by entailment over its knowledge base.
///
/// The game reports every uncovered cell through [`Agent::report`]; reports are
/// encoded lazily on the next call to [`Agent::next_move`].
pub struct Agent {
    grid: Grid,
    num_mines: usize,
    kb: KnowledgeBase<Cell, Box<dyn IncrementalSolver>>,
    unrevealed: BTreeSet<Cell>,
    frontier: BTreeSet<Cell>,
    flagged: BTreeSet<Cell>,
    pending: Vec<(Cell, usize)>,
    moves: usize,
}

impl Agent {
    pub fn new(rows: usize, cols: usize, num_mines: usize, config: &AgentConfig) -> Self {
        let grid = Grid::new(rows, cols);
        let kb = KnowledgeBase::with_solver(config.backend.build(config.limits))
            .with_memoize(config.memoize);
        Self {
            grid,
            num_mines,
            kb,
            unrevealed: grid.cells().collect(),
            frontier: BTreeSet::new(),
            flagged: BTreeSet::new(),
            pending: Vec::new(),
            moves: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn num_mines(&self) -> usize {
        self.num_mines
    }

    pub fn knowledge(&self) -> &KnowledgeBase<Cell, Box<dyn IncrementalSolver>> {
        &self.kb
    }

    pub fn flagged(&self) -> &BTreeSet<Cell> {
        &self.flagged
    }

    /// Covered, unflagged cells next to a revealed clue.
    pub fn frontier(&self) -> BTreeSet<Cell> {
        self.frontier
            .iter()
            .filter(|c| self.unrevealed.contains(c) && !self.flagged.contains(c))
            .copied()
            .collect()
    }

    /// Records that `cell` was uncovered with `clue` mines around it.
    pub fn report(&mut self, cell: Cell, clue: usize) -> Result<(), BoardError> {
        self.grid.check(cell)?;
        let neighbors = self.grid.neighbors(cell).len();
        if clue > neighbors {
            return Err(BoardError::ClueTooLarge {
                cell,
                clue,
                neighbors,
            });
        }
        self.unrevealed.remove(&cell);
        self.pending.push((cell, clue));
        Ok(())
    }

    fn process_report(&mut self, cell: Cell, clue: usize) -> Result<(), ConstraintError> {
        self.frontier.remove(&cell);
        self.kb.assert_safe(cell)?;
        let hidden = self
            .grid
            .neighbors(cell)
            .into_iter()
            .filter(|n| self.unrevealed.contains(n))
            .collect::<Vec<_>>();
        if hidden.is_empty() {
            return Ok(());
        }
        self.frontier.extend(hidden.iter().copied());
        self.kb.add_constraint(hidden, clue)?;
        Ok(())
    }

    /// Classifies the current frontier.
    ///
    /// Every pending report is ingested even if an earlier one is rejected;
    /// the first rejection is returned.
    pub fn infer_all(&mut self) -> Result<Inferences<Cell>, ConstraintError> {
        let mut rejected = None;
        for (cell, clue) in std::mem::take(&mut self.pending) {
            if let Err(err) = self.process_report(cell, clue) {
                warn!(cell = %cell, clue, %err, "report rejected");
                rejected.get_or_insert(err);
            }
        }
        if let Some(err) = rejected {
            return Err(err);
        }
        let frontier = self.frontier();
        Ok(self.kb.infer(frontier))
    }

    /// Picks the next action.
    ///
    /// Newly proven mines are flagged first, one per call. Then a proven-safe
    /// cell is revealed, preferring cells next to a flagged mine, each group in
    /// row-major order. With nothing proven the agent guesses.
    pub fn next_move(&mut self) -> Result<Move, ConstraintError> {
        self.moves += 1;
        let found = self.infer_all()?;

        if let Some(&mine) = found.mines.iter().find(|c| !self.flagged.contains(c)) {
            self.flagged.insert(mine);
            debug!(move_num = self.moves, cell = %mine, "flag");
            return Ok(Move::Flag(mine));
        }

        let near_mine = |c: &&Cell| {
            self.grid
                .neighbors(**c)
                .iter()
                .any(|n| self.flagged.contains(n))
        };
        let pick = found
            .safe
            .iter()
            .find(near_mine)
            .or_else(|| found.safe.iter().next())
            .copied();
        match pick {
            Some(cell) => {
                debug!(move_num = self.moves, cell = %cell, "reveal");
                Ok(Move::Reveal(cell))
            }
            None => {
                info!(
                    move_num = self.moves,
                    frontier = self.frontier.len(),
                    "no proven safe cell, guessing"
                );
                Ok(Move::Guess)
            }
        }
    }
}
