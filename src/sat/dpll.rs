use tracing::{debug, warn};

use crate::cnf::{Clause, Cnf, Lit, Var};
use crate::sat::assignment::Assignment;
use crate::sat::propagate::{Outcome, propagate_active};

/// Node budget used by callers that want a bounded search.
pub const DEFAULT_MAX_NODES: usize = 200_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Sat(Vec<bool>),
    Unsat,
    /// The node budget ran out before a verdict.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_nodes: Option<usize>,
}

impl Limits {
    pub fn unbounded() -> Self {
        Self { max_nodes: None }
    }

    pub fn nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::nodes(DEFAULT_MAX_NODES)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DpllStats {
    pub nodes: usize,
    pub decisions: usize,
    pub conflicts: usize,
    pub propagations: usize,
}

pub fn solve(cnf: &Cnf) -> SatResult {
    solve_with_limits(cnf, Limits::unbounded()).0
}

pub fn solve_with_limits(cnf: &Cnf, limits: Limits) -> (SatResult, DpllStats) {
    let clauses = cnf.clauses().cloned().collect::<Vec<_>>();
    let mut search = Search {
        clauses: &clauses,
        limits,
        stats: DpllStats::default(),
    };
    let active = (0..clauses.len()).collect::<Vec<_>>();
    let result = match search.run(Assignment::new(cnf.num_vars), active) {
        // fill free vars deterministically
        Verdict::Sat(assignment) => SatResult::Sat(assignment.to_model()),
        Verdict::Unsat => SatResult::Unsat,
        Verdict::Exhausted => {
            warn!(
                nodes = search.stats.nodes,
                vars = cnf.num_vars,
                clauses = clauses.len(),
                "dpll node budget exhausted"
            );
            SatResult::Exhausted
        }
    };
    debug!(
        vars = cnf.num_vars,
        clauses = clauses.len(),
        nodes = search.stats.nodes,
        decisions = search.stats.decisions,
        conflicts = search.stats.conflicts,
        sat = matches!(result, SatResult::Sat(_)),
        "dpll finished"
    );
    (result, search.stats)
}

pub fn is_satisfiable(cnf: &Cnf) -> bool {
    matches!(solve(cnf), SatResult::Sat(_))
}

pub fn solve_model(cnf: &Cnf) -> Option<Vec<bool>> {
    match solve(cnf) {
        SatResult::Sat(m) => Some(m),
        SatResult::Unsat | SatResult::Exhausted => None,
    }
}

enum Verdict {
    Sat(Assignment),
    Unsat,
    Exhausted,
}

struct Search<'a> {
    clauses: &'a [Clause],
    limits: Limits,
    stats: DpllStats,
}

impl Search<'_> {
    // Each frame owns its assignment and active list; backtracking drops them.
    fn run(&mut self, mut assignment: Assignment, mut active: Vec<usize>) -> Verdict {
        self.stats.nodes += 1;
        if self.limits.max_nodes.is_some_and(|max| self.stats.nodes > max) {
            return Verdict::Exhausted;
        }

        let mut forced = Vec::new();
        let outcome = propagate_active(self.clauses, &mut active, &mut assignment, &mut forced);
        self.stats.propagations += forced.len();
        if let Outcome::Conflict { .. } = outcome {
            self.stats.conflicts += 1;
            return Verdict::Unsat;
        }
        if active.is_empty() {
            return Verdict::Sat(assignment);
        }

        let Some(var) = branch_var(self.clauses, &active, &assignment) else {
            return Verdict::Unsat;
        };
        self.stats.decisions += 1;

        for value in [true, false] {
            let mut next = assignment.clone();
            if next.assign(Lit::new(var, value)).is_err() {
                continue;
            }
            match self.run(next, active.clone()) {
                Verdict::Unsat => {}
                other => return other,
            }
        }
        Verdict::Unsat
    }
}

/// Lowest-numbered free variable occurring in an open clause.
fn branch_var(clauses: &[Clause], active: &[usize], assignment: &Assignment) -> Option<Var> {
    active
        .iter()
        .flat_map(|&idx| clauses[idx].vars())
        .filter(|&v| !assignment.is_assigned(v))
        .min()
}
