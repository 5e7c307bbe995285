use crate::cnf::{Clause, Cnf, Lit};
use crate::sat::dpll::{Limits, SatResult, solve_with_limits};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

#[derive(Debug, Clone)]
pub struct DpllSolverBackend {
    cnf: Cnf,
    limits: Limits,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl DpllSolverBackend {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            cnf: Cnf::new(0),
            limits,
            last_model: None,
            stats: SolverStats::default(),
        }
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }
}

impl Default for DpllSolverBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for DpllSolverBackend {
    fn new_var(&mut self) -> u32 {
        self.cnf.fresh_var()
    }

    fn add_clause(&mut self, clause: Clause) {
        self.cnf.add_clause(clause);
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.stats.solve_calls += 1;
        // assumptions go into a scratch copy, the stored formula never changes here
        let mut work = self.cnf.clone();
        for &a in assumptions {
            work.add_clause(Clause::unit(a));
        }
        let (result, run) = solve_with_limits(&work, self.limits);
        self.stats.decisions += run.decisions;
        self.stats.conflicts += run.conflicts;
        match result {
            SatResult::Sat(model) => {
                self.last_model = Some(model);
                SolveResult::Sat
            }
            SatResult::Unsat => {
                self.last_model = None;
                SolveResult::Unsat
            }
            SatResult::Exhausted => {
                self.last_model = None;
                self.stats.unknown += 1;
                SolveResult::Unknown
            }
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = var as usize;
        self.last_model
            .as_ref()
            .and_then(|m| if idx < m.len() { Some(m[idx]) } else { None })
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "dpll"
    }
}
