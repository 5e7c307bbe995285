use thiserror::Error;

use crate::board::Cell;

/// Rejected clue input. Raised when the clue is ingested, never at query time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("mine count {mine_count} is outside 0..={cells} for this constraint")]
    MineCountOutOfRange { mine_count: usize, cells: usize },
    #[error("cell {0} is already known to be safe, cannot mark it as a mine")]
    ContradictsSafe(String),
    #[error("cell {0} is already known to be a mine, cannot mark it as safe")]
    ContradictsMine(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {cell} is outside a {rows}x{cols} board")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
    #[error("cannot place {mines} mines on a {rows}x{cols} board")]
    TooManyMines { mines: usize, rows: usize, cols: usize },
    #[error("clue {clue} at {cell} exceeds its {neighbors} neighbours")]
    ClueTooLarge {
        cell: Cell,
        clue: usize,
        neighbors: usize,
    },
}
