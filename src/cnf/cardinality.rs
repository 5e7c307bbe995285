use itertools::Itertools;

use super::cnf::{Clause, Lit, Var};

/// Exact CNF for "exactly `k` of `vars` are true".
///
/// At most `k`: every `k + 1` subset has a false member. At least `k`: every
/// `n - k + 1` subset has a true member. The two boundary cases collapse to
/// unit clauses (`k == 0` gives all-negative units, `k == n` all-positive).
/// Duplicate variables are collapsed first. Returns `None` when `k > n`.
pub fn exactly(vars: &[Var], k: usize) -> Option<Vec<Clause>> {
    let vars = vars.iter().copied().unique().collect::<Vec<_>>();
    let n = vars.len();
    if k > n {
        return None;
    }
    let mut out = at_most(&vars, k);
    out.extend(at_least(&vars, k));
    Some(out)
}

pub fn at_most(vars: &[Var], k: usize) -> Vec<Clause> {
    if k >= vars.len() {
        return Vec::new();
    }
    vars.iter()
        .copied()
        .combinations(k + 1)
        .map(|combo| combo.into_iter().map(Lit::negative).collect())
        .collect()
}

pub fn at_least(vars: &[Var], k: usize) -> Vec<Clause> {
    let n = vars.len();
    if k == 0 {
        return Vec::new();
    }
    if k > n {
        return vec![Clause::empty()];
    }
    vars.iter()
        .copied()
        .combinations(n - k + 1)
        .map(|combo| combo.into_iter().map(Lit::pos).collect())
        .collect()
}
