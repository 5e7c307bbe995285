pub mod dpll_backend;
pub mod search_backend;
pub mod varisat;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::cnf::{Clause, Lit};
use crate::sat::dpll::Limits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The backend gave up (budget or internal failure).
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub decisions: usize,
    pub conflicts: usize,
    pub unknown: usize,
}

pub trait IncrementalSolver {
    fn new_var(&mut self) -> u32;
    fn add_clause(&mut self, clause: Clause);
    /// Solves the stored clauses conjoined with `assumptions`. Assumptions do
    /// not persist past the call.
    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult;
    fn model_value(&self, var: u32) -> Option<bool>;
    fn stats(&self) -> SolverStats;
    fn backend_name(&self) -> &'static str;
}

impl<S: IncrementalSolver + ?Sized> IncrementalSolver for Box<S> {
    fn new_var(&mut self) -> u32 {
        (**self).new_var()
    }

    fn add_clause(&mut self, clause: Clause) {
        (**self).add_clause(clause)
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        (**self).solve(assumptions)
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        (**self).model_value(var)
    }

    fn stats(&self) -> SolverStats {
        (**self).stats()
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// Backends an agent can run on. The brute-force search backend is left out;
/// it is exponential and only serves as a reference in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Dpll,
    Varisat,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Dpll => "dpll",
            Backend::Varisat => "varisat",
        }
    }

    /// `limits` only bounds the DPLL backend.
    pub fn build(self, limits: Limits) -> Box<dyn IncrementalSolver> {
        match self {
            Backend::Dpll => Box::new(dpll_backend::DpllSolverBackend::with_limits(limits)),
            Backend::Varisat => Box::new(varisat::VarisatSolver::new()),
        }
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "dpll" => Ok(Backend::Dpll),
            "varisat" => Ok(Backend::Varisat),
            _ => bail!("unknown backend '{}', expected dpll|varisat", s),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
