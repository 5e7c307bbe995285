use minelogic::cnf::text::SymbolTable;
use minelogic::cnf::Lit;
use minelogic::sat::dpll::Limits;
use minelogic::sat::entail::{Entailment, entails, entails_with_limits};
use minelogic::sat::search::all_models;
use proptest::prelude::*;

mod common;
use common::arb_cnf;

#[test]
fn modus_ponens_is_entailed() {
    let mut st = SymbolTable::new();
    let kb = st.sentence(&["a", "!a || b"]).expect("sentence");
    let b = st.lit("b").expect("lit");
    assert!(entails(&kb, b));
    assert!(!entails(&kb, b.neg()));
    // the knowledge base itself is not extended by the query
    assert_eq!(kb.len(), 2);
}

#[test]
fn unmentioned_variable_is_not_entailed_either_way() {
    let mut st = SymbolTable::new();
    let kb = st.sentence(&["a || b"]).expect("sentence");
    let c = Lit::pos(9);
    assert!(!entails(&kb, c));
    assert!(!entails(&kb, c.neg()));
}

#[test]
fn exhausted_budget_is_inconclusive() {
    let mut st = SymbolTable::new();
    let kb = st
        .sentence(&["a || b || c", "!a || !b", "!b || !c", "!a || !c"])
        .expect("sentence");
    let a = st.lit("a").expect("lit");
    assert_eq!(
        entails_with_limits(&kb, a, Limits::nodes(1)),
        Entailment::Inconclusive
    );
    assert_eq!(
        entails_with_limits(&kb, a, Limits::unbounded()),
        Entailment::NotEntailed
    );
}

proptest! {
    #[test]
    fn entailment_matches_every_model(cnf in arb_cnf(8, 24), var in 1u32..=8, sign in any::<bool>()) {
        let lit = Lit::new(var, sign);
        let models = all_models(&cnf);
        let holds_everywhere = models
            .iter()
            .all(|m| lit.under(m.get(var as usize).copied().unwrap_or(false)));
        // vars beyond num_vars are unconstrained unless the formula has no model
        let expected = if var > cnf.num_vars {
            models.is_empty()
        } else {
            holds_everywhere
        };
        prop_assert_eq!(entails(&cnf, lit), expected);
    }
}
