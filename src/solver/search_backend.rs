use crate::cnf::{Clause, Cnf, Lit};
use crate::sat::dpll::Limits;
use crate::sat::search::search_solve_with_limits;
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Brute-force backend. Exponential in the variable count; meant for
/// cross-checking the other backends on small boards.
#[derive(Debug, Clone)]
pub struct SearchSolverBackend {
    cnf: Cnf,
    limits: Limits,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl SearchSolverBackend {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// `limits` caps the number of search tree nodes per call.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            cnf: Cnf::new(0),
            limits,
            last_model: None,
            stats: SolverStats::default(),
        }
    }
}

impl Default for SearchSolverBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for SearchSolverBackend {
    fn new_var(&mut self) -> u32 {
        self.cnf.fresh_var()
    }

    fn add_clause(&mut self, clause: Clause) {
        self.cnf.add_clause(clause);
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.stats.solve_calls += 1;
        let mut work = self.cnf.clone();
        for &a in assumptions {
            work.add_clause(Clause::unit(a));
        }
        let outcome = search_solve_with_limits(&work, self.limits);
        self.stats.decisions += outcome.visited;
        self.last_model = outcome.model;
        if outcome.exhausted {
            self.stats.unknown += 1;
            SolveResult::Unknown
        } else if self.last_model.is_some() {
            SolveResult::Sat
        } else {
            SolveResult::Unsat
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        self.last_model.as_ref()?.get(var as usize).copied()
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "search"
    }
}
