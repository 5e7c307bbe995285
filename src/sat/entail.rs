use crate::cnf::{Cnf, Lit};
use crate::sat::dpll::{Limits, SatResult, solve_with_limits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entailment {
    /// `lit` holds in every model.
    Entailed,
    /// Some model makes `lit` false.
    NotEntailed,
    /// The search budget ran out.
    Inconclusive,
}

/// `cnf |= lit` iff `cnf && !lit` has no model.
pub fn entails(cnf: &Cnf, lit: Lit) -> bool {
    matches!(
        entails_with_limits(cnf, lit, Limits::unbounded()),
        Entailment::Entailed
    )
}

pub fn entails_with_limits(cnf: &Cnf, lit: Lit, limits: Limits) -> Entailment {
    let refutation = cnf.with_unit(lit.neg());
    match solve_with_limits(&refutation, limits).0 {
        SatResult::Unsat => Entailment::Entailed,
        SatResult::Sat(_) => Entailment::NotEntailed,
        SatResult::Exhausted => Entailment::Inconclusive,
    }
}
