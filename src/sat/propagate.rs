//! Unit propagation to a fixed point.
//!
//! Clauses are scanned in formula order; a sweep that forces nothing ends the
//! loop. Satisfied clauses are dropped from the active index list so later
//! sweeps (and deeper search frames holding a copy of the list) skip them.

use tracing::trace;

use crate::cnf::{Clause, Cnf, Lit};
use crate::sat::assignment::Assignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No clause is unit and none is falsified.
    Fixpoint,
    /// Clause at this position (formula order) has every literal false.
    Conflict { clause: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    pub outcome: Outcome,
    /// Literals forced during this run, in the order they were derived.
    pub forced: Vec<Lit>,
    /// Clauses not yet satisfied when propagation stopped.
    pub open_clauses: usize,
}

impl Propagation {
    pub fn is_conflict(&self) -> bool {
        matches!(self.outcome, Outcome::Conflict { .. })
    }

    /// Every clause satisfied by the extended assignment.
    pub fn is_satisfied(&self) -> bool {
        !self.is_conflict() && self.open_clauses == 0
    }
}

/// Extends `assignment` with every literal forced by unit clauses of `cnf`.
pub fn propagate(cnf: &Cnf, assignment: &mut Assignment) -> Propagation {
    let clauses = cnf.clauses().cloned().collect::<Vec<_>>();
    let mut active = (0..clauses.len()).collect::<Vec<_>>();
    let mut forced = Vec::new();
    let outcome = propagate_active(&clauses, &mut active, assignment, &mut forced);
    Propagation {
        outcome,
        forced,
        open_clauses: active.len(),
    }
}

pub(crate) fn propagate_active(
    clauses: &[Clause],
    active: &mut Vec<usize>,
    assignment: &mut Assignment,
    forced: &mut Vec<Lit>,
) -> Outcome {
    loop {
        let mut changed = false;
        let mut still_open = Vec::with_capacity(active.len());

        for &idx in active.iter() {
            let mut open_count = 0usize;
            let mut last_open = None;
            let mut has_true = false;

            for &lit in clauses[idx].lits() {
                match assignment.lit_value(lit) {
                    Some(true) => {
                        has_true = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        open_count += 1;
                        last_open = Some(lit);
                    }
                }
            }

            if has_true {
                continue;
            }
            match (open_count, last_open) {
                (0, _) | (_, None) => return Outcome::Conflict { clause: idx },
                (1, Some(lit)) => match assignment.assign(lit) {
                    Ok(_) => {
                        trace!(%lit, clause = idx, "forced");
                        forced.push(lit);
                        changed = true;
                    }
                    Err(_) => return Outcome::Conflict { clause: idx },
                },
                _ => still_open.push(idx),
            }
        }

        *active = still_open;
        if !changed {
            return Outcome::Fixpoint;
        }
    }
}
