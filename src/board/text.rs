//! Whitespace-separated board snapshots.
//!
//! One row per line. A digit is a revealed cell with that clue, `_` or `#` a
//! covered cell, `*` a covered cell flagged as a mine.

use std::collections::BTreeSet;

use anyhow::{Result, bail};

use crate::agent::knowledge::KnowledgeBase;
use crate::board::{Cell, Grid};
use crate::error::{BoardError, ConstraintError};
use crate::solver::IncrementalSolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub clues: Vec<(Cell, usize)>,
    pub covered: BTreeSet<Cell>,
    pub flagged: BTreeSet<Cell>,
}

pub fn parse_snapshot(text: &str) -> Result<Snapshot> {
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .collect::<Vec<_>>();
    if rows.is_empty() {
        bail!("snapshot has no rows");
    }
    let cols = rows[0].len();
    let grid = Grid::new(rows.len(), cols);

    let mut clues = Vec::new();
    let mut covered = BTreeSet::new();
    let mut flagged = BTreeSet::new();
    for (r, row) in rows.iter().enumerate() {
        if row.len() != cols {
            bail!(
                "row {} has {} cells, expected {}",
                r + 1,
                row.len(),
                cols
            );
        }
        for (c, token) in row.iter().enumerate() {
            let cell = Cell::new(r, c);
            match *token {
                "_" | "#" => {
                    covered.insert(cell);
                }
                "*" => {
                    flagged.insert(cell);
                }
                digits => {
                    let clue = digits
                        .parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("invalid token '{}' at {}", digits, cell))?;
                    let neighbors = grid.neighbors(cell).len();
                    if clue > neighbors {
                        return Err(BoardError::ClueTooLarge {
                            cell,
                            clue,
                            neighbors,
                        }
                        .into());
                    }
                    clues.push((cell, clue));
                }
            }
        }
    }
    Ok(Snapshot {
        grid,
        clues,
        covered,
        flagged,
    })
}

impl Snapshot {
    /// Covered cells that touch at least one revealed clue.
    pub fn frontier(&self) -> BTreeSet<Cell> {
        self.clues
            .iter()
            .flat_map(|&(cell, _)| self.grid.neighbors(cell))
            .filter(|n| self.covered.contains(n))
            .collect()
    }

    /// Encodes every clue and flag of the snapshot into `kb`.
    pub fn load_into<S: IncrementalSolver>(
        &self,
        kb: &mut KnowledgeBase<Cell, S>,
    ) -> Result<(), ConstraintError> {
        for &flag in &self.flagged {
            kb.assert_mine(flag)?;
        }
        for &(cell, clue) in &self.clues {
            kb.assert_safe(cell)?;
            let hidden = self
                .grid
                .neighbors(cell)
                .into_iter()
                .filter(|n| self.covered.contains(n) || self.flagged.contains(n))
                .collect::<Vec<_>>();
            kb.add_constraint(hidden, clue)?;
        }
        Ok(())
    }
}
