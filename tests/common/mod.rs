use minelogic::cnf::{Clause, Cnf, Lit};
use proptest::prelude::*;

/// Random formulas over `1..=n` variables with clauses of one to three literals.
pub fn arb_cnf(max_vars: u32, max_clauses: usize) -> impl Strategy<Value = Cnf> {
    (1..=max_vars).prop_flat_map(move |n| {
        prop::collection::vec(
            prop::collection::vec((1..=n, any::<bool>()), 1..=3),
            0..=max_clauses,
        )
        .prop_map(move |clauses| {
            let mut cnf = Cnf::new(n);
            for c in clauses {
                cnf.add_clause(c.into_iter().map(|(v, s)| Lit::new(v, s)).collect::<Clause>());
            }
            cnf
        })
    })
}
