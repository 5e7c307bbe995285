//! Monotonic knowledge base over cell keys.
//!
//! Each key gets one propositional variable meaning "this cell holds a mine".
//! Clauses are only ever added. Entailment is answered by refutation: the
//! backend is asked to solve the stored clauses under the negated literal as an
//! assumption, which leaves the stored clauses untouched.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use crate::cnf::cardinality;
use crate::cnf::{Clause, Cnf, Lit, Var};
use crate::error::ConstraintError;
use crate::sat::assignment::Assignment;
use crate::sat::propagate::propagate;
use crate::solver::dpll_backend::DpllSolverBackend;
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inference {
    Safe,
    Mine,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inferences<K: Ord> {
    pub safe: BTreeSet<K>,
    pub mines: BTreeSet<K>,
}

impl<K: Ord> Default for Inferences<K> {
    fn default() -> Self {
        Self {
            safe: BTreeSet::new(),
            mines: BTreeSet::new(),
        }
    }
}

pub struct KnowledgeBase<K, S = DpllSolverBackend> {
    solver: S,
    vars: IndexMap<K, Var>,
    clauses: IndexSet<Clause>,
    // facts proven so far, true = mine
    known: IndexMap<K, bool>,
    memoize: bool,
}

impl<K, S> KnowledgeBase<K, S>
where
    K: Copy + Eq + Hash + Ord + fmt::Display,
    S: IncrementalSolver,
{
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::with_solver(S::default())
    }

    pub fn with_solver(solver: S) -> Self {
        Self {
            solver,
            vars: IndexMap::new(),
            clauses: IndexSet::new(),
            known: IndexMap::new(),
            memoize: true,
        }
    }

    /// When enabled (the default), proven facts are stored back as unit clauses.
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn stats(&self) -> SolverStats {
        self.solver.stats()
    }

    pub fn backend_name(&self) -> &'static str {
        self.solver.backend_name()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Keys mentioned by any constraint, in first-mention order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.vars.keys().copied()
    }

    pub fn var_of(&self, key: K) -> Option<Var> {
        self.vars.get(&key).copied()
    }

    pub fn known(&self, key: K) -> Option<bool> {
        self.known.get(&key).copied()
    }

    /// Snapshot of the stored clauses.
    pub fn cnf(&self) -> Cnf {
        let mut cnf = Cnf::new(self.vars.len() as u32);
        cnf.extend(self.clauses.iter().cloned());
        cnf
    }

    fn var(&mut self, key: K) -> Var {
        if let Some(&v) = self.vars.get(&key) {
            return v;
        }
        let v = self.solver.new_var();
        self.vars.insert(key, v);
        v
    }

    fn key_of(&self, var: Var) -> Option<K> {
        self.vars
            .iter()
            .find(|&(_, &v)| v == var)
            .map(|(&k, _)| k)
    }

    fn add_clause(&mut self, clause: Clause) -> bool {
        if clause.is_tautology() || !self.clauses.insert(clause.clone()) {
            return false;
        }
        self.solver.add_clause(clause);
        true
    }

    /// Ingests "exactly `mine_count` of `cells` are mines".
    ///
    /// Repeated cells count once. Returns the number of clauses that were new.
    pub fn add_constraint<I>(&mut self, cells: I, mine_count: usize) -> Result<usize, ConstraintError>
    where
        I: IntoIterator<Item = K>,
    {
        let cells = cells.into_iter().collect::<IndexSet<_>>();
        if mine_count > cells.len() {
            return Err(ConstraintError::MineCountOutOfRange {
                mine_count,
                cells: cells.len(),
            });
        }
        let vars = cells.iter().map(|&k| self.var(k)).collect::<Vec<_>>();
        let clauses = cardinality::exactly(&vars, mine_count).ok_or(
            ConstraintError::MineCountOutOfRange {
                mine_count,
                cells: cells.len(),
            },
        )?;
        let added = clauses
            .into_iter()
            .map(|c| self.add_clause(c))
            .filter(|&new| new)
            .count();
        debug!(cells = cells.len(), mine_count, added, "constraint added");
        Ok(added)
    }

    pub fn assert_safe(&mut self, key: K) -> Result<(), ConstraintError> {
        if self.known(key) == Some(true) {
            return Err(ConstraintError::ContradictsMine(key.to_string()));
        }
        self.add_constraint([key], 0)?;
        self.known.insert(key, false);
        Ok(())
    }

    pub fn assert_mine(&mut self, key: K) -> Result<(), ConstraintError> {
        if self.known(key) == Some(false) {
            return Err(ConstraintError::ContradictsSafe(key.to_string()));
        }
        self.add_constraint([key], 1)?;
        self.known.insert(key, true);
        Ok(())
    }

    /// Decides whether `key` is a mine in every model, in no model, or neither.
    ///
    /// Keys that no constraint mentions are `Unknown`. A search that runs out
    /// of budget also yields `Unknown`.
    pub fn query(&mut self, key: K) -> Inference {
        if let Some(&mine) = self.known.get(&key) {
            return if mine { Inference::Mine } else { Inference::Safe };
        }
        let Some(var) = self.var_of(key) else {
            return Inference::Unknown;
        };
        let mine = Lit::pos(var);

        let result = match self.solver.solve(&[mine]) {
            SolveResult::Unsat => Inference::Safe,
            SolveResult::Unknown => Inference::Unknown,
            SolveResult::Sat => match self.solver.solve(&[mine.neg()]) {
                SolveResult::Unsat => Inference::Mine,
                SolveResult::Sat | SolveResult::Unknown => Inference::Unknown,
            },
        };

        if self.memoize {
            match result {
                Inference::Safe => self.remember(key, mine.neg()),
                Inference::Mine => self.remember(key, mine),
                Inference::Unknown => {}
            }
        }
        result
    }

    fn remember(&mut self, key: K, lit: Lit) {
        self.known.insert(key, lit.sign);
        self.add_clause(Clause::unit(lit));
    }

    pub fn query_safe(&mut self, key: K) -> bool {
        self.query(key) == Inference::Safe
    }

    pub fn query_mine(&mut self, key: K) -> bool {
        self.query(key) == Inference::Mine
    }

    /// Stores every literal that unit propagation forces from the stored
    /// clauses. Returns how many new facts were recorded.
    pub fn consolidate(&mut self) -> usize {
        let cnf = self.cnf();
        let mut assignment = Assignment::new(cnf.num_vars);
        let run = propagate(&cnf, &mut assignment);
        if run.is_conflict() {
            warn!("knowledge base is inconsistent, skipping consolidation");
            return 0;
        }
        let mut learned = 0usize;
        for lit in run.forced {
            let Some(key) = self.key_of(lit.var) else {
                continue;
            };
            if self.known.contains_key(&key) {
                continue;
            }
            self.remember(key, lit);
            learned += 1;
        }
        learned
    }

    /// Classifies `candidates`, returning the proven-safe and proven-mined ones.
    pub fn infer<I>(&mut self, candidates: I) -> Inferences<K>
    where
        I: IntoIterator<Item = K>,
    {
        if self.memoize {
            self.consolidate();
        }
        let candidates = candidates.into_iter().collect::<BTreeSet<_>>();
        let mut out = Inferences::default();
        for key in candidates {
            match self.query(key) {
                Inference::Safe => {
                    out.safe.insert(key);
                }
                Inference::Mine => {
                    out.mines.insert(key);
                }
                Inference::Unknown => {}
            }
        }
        debug!(
            backend = self.backend_name(),
            safe = out.safe.len(),
            mines = out.mines.len(),
            clauses = self.clauses.len(),
            "inference round"
        );
        out
    }

    /// Classifies every key any constraint mentions.
    pub fn infer_all(&mut self) -> Inferences<K> {
        let keys = self.vars.keys().copied().collect::<Vec<_>>();
        self.infer(keys)
    }

    pub fn infer_safe(&mut self) -> BTreeSet<K> {
        self.infer_all().safe
    }

    pub fn infer_mines(&mut self) -> BTreeSet<K> {
        self.infer_all().mines
    }
}

impl<K, S> Default for KnowledgeBase<K, S>
where
    K: Copy + Eq + Hash + Ord + fmt::Display,
    S: IncrementalSolver + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
