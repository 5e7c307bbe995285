//! Exhaustive model search without propagation.
//!
//! Walks variables `1..=num_vars` in order, depth first, trying `true` before
//! `false`, and checks the formula only at full assignments. Used as a
//! reference answer for the DPLL procedure on small formulas.

use tracing::warn;

use crate::cnf::Cnf;
use crate::sat::dpll::Limits;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub model: Option<Vec<bool>>,
    /// Search tree nodes visited, leaves included.
    pub visited: usize,
    /// The node budget ran out before the tree was covered.
    pub exhausted: bool,
}

pub fn search_solve(cnf: &Cnf) -> SearchOutcome {
    search_solve_with_limits(cnf, Limits::unbounded())
}

pub fn search_solve_with_limits(cnf: &Cnf, limits: Limits) -> SearchOutcome {
    let n = cnf.num_vars as usize;
    let mut walk = Walk {
        cnf,
        limits,
        model: vec![false; n + 1],
        visited: 0,
    };
    let step = walk.descend(1);
    if step == Step::Exhausted {
        warn!(
            visited = walk.visited,
            vars = cnf.num_vars,
            "search node budget exhausted"
        );
    }
    SearchOutcome {
        model: (step == Step::Found).then_some(walk.model),
        visited: walk.visited,
        exhausted: step == Step::Exhausted,
    }
}

pub fn search_is_sat(cnf: &Cnf) -> bool {
    search_solve(cnf).model.is_some()
}

/// Every total model of `cnf` over variables `1..=num_vars`.
pub fn all_models(cnf: &Cnf) -> Vec<Vec<bool>> {
    let n = cnf.num_vars as usize;
    let mut out = Vec::new();
    let mut model = vec![false; n + 1];
    collect(cnf, &mut model, 1, &mut out);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Found,
    Exhausted,
    Missing,
}

struct Walk<'a> {
    cnf: &'a Cnf,
    limits: Limits,
    model: Vec<bool>,
    visited: usize,
}

impl Walk<'_> {
    fn descend(&mut self, var: usize) -> Step {
        self.visited += 1;
        if self.limits.max_nodes.is_some_and(|max| self.visited > max) {
            return Step::Exhausted;
        }
        if var == self.model.len() {
            return if self.cnf.check_model(&self.model) {
                Step::Found
            } else {
                Step::Missing
            };
        }
        for value in [true, false] {
            self.model[var] = value;
            match self.descend(var + 1) {
                Step::Missing => {}
                other => return other,
            }
        }
        self.model[var] = false;
        Step::Missing
    }
}

fn collect(cnf: &Cnf, model: &mut [bool], var: usize, out: &mut Vec<Vec<bool>>) {
    if var == model.len() {
        if cnf.check_model(model) {
            out.push(model.to_vec());
        }
        return;
    }
    for value in [true, false] {
        model[var] = value;
        collect(cnf, model, var + 1, out);
    }
    model[var] = false;
}
