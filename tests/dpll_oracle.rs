use minelogic::cnf::text::SymbolTable;
use minelogic::cnf::{Clause, Cnf, Lit};
use minelogic::sat::dpll::{Limits, SatResult, is_satisfiable, solve, solve_with_limits};
use minelogic::sat::search::{search_is_sat, search_solve};
use proptest::prelude::*;

mod common;
use common::arb_cnf;

fn all_clauses(num_vars: u32, max_len: usize) -> Vec<Clause> {
    // every non-tautological clause with 1..=max_len literals
    let mut out = Vec::new();
    let lits = (1..=num_vars)
        .flat_map(|v| [Lit::pos(v), Lit::negative(v)])
        .collect::<Vec<_>>();
    let total = 1usize << lits.len();
    for mask in 1..total {
        let picked = (0..lits.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| lits[i])
            .collect::<Vec<_>>();
        let clause = Clause::new(picked);
        if clause.len() <= max_len && !clause.is_tautology() {
            out.push(clause);
        }
    }
    out
}

fn check_against_oracle(cnf: &Cnf) {
    let expected = search_is_sat(cnf);
    match solve(cnf) {
        SatResult::Sat(model) => {
            assert!(expected, "dpll found a model the oracle missed:\n{cnf}");
            assert!(cnf.check_model(&model), "bad model for\n{cnf}");
        }
        SatResult::Unsat => assert!(!expected, "dpll missed a model:\n{cnf}"),
        SatResult::Exhausted => panic!("unbounded search cannot exhaust"),
    }
}

#[test]
fn every_formula_over_two_variables_matches_oracle() {
    let mut universe = all_clauses(2, 2);
    universe.push(Clause::empty());
    assert_eq!(universe.len(), 9);
    for mask in 0u32..(1 << universe.len()) {
        let mut cnf = Cnf::new(2);
        for (i, clause) in universe.iter().enumerate() {
            if mask & (1 << i) != 0 {
                cnf.add_clause(clause.clone());
            }
        }
        check_against_oracle(&cnf);
    }
}

#[test]
fn every_binary_formula_over_three_variables_matches_oracle() {
    let universe = all_clauses(3, 2)
        .into_iter()
        .filter(|c| c.len() == 2)
        .collect::<Vec<_>>();
    assert_eq!(universe.len(), 12);
    for mask in 0u32..(1 << universe.len()) {
        let mut cnf = Cnf::new(3);
        for (i, clause) in universe.iter().enumerate() {
            if mask & (1 << i) != 0 {
                cnf.add_clause(clause.clone());
            }
        }
        check_against_oracle(&cnf);
    }
}

#[test]
fn pigeonhole_three_into_two_is_unsat() {
    let mut st = SymbolTable::new();
    let cnf = st
        .sentence(&[
            "p1h1 || p1h2",
            "p2h1 || p2h2",
            "p3h1 || p3h2",
            "!p1h1 || !p2h1",
            "!p1h1 || !p3h1",
            "!p2h1 || !p3h1",
            "!p1h2 || !p2h2",
            "!p1h2 || !p3h2",
            "!p2h2 || !p3h2",
        ])
        .expect("sentence");
    assert!(!is_satisfiable(&cnf));
    assert!(!search_is_sat(&cnf));
}

#[test]
fn empty_formula_is_sat_with_all_false_model() {
    let cnf = Cnf::new(3);
    assert_eq!(solve(&cnf), SatResult::Sat(vec![false; 4]));
}

#[test]
fn node_budget_reports_exhaustion() {
    let cnf = Cnf::from_clauses([
        vec![Lit::pos(1), Lit::pos(2)],
        vec![Lit::negative(1), Lit::pos(2)],
        vec![Lit::pos(1), Lit::negative(2)],
    ]);
    let (result, stats) = solve_with_limits(&cnf, Limits::nodes(1));
    assert_eq!(result, SatResult::Exhausted);
    assert_eq!(stats.decisions, 1);

    let (result, stats) = solve_with_limits(&cnf, Limits::unbounded());
    assert_eq!(result, SatResult::Sat(vec![false, true, true]));
    assert!(stats.nodes >= 2);

    // pure propagation needs a single node
    let units = Cnf::from_clauses([vec![Lit::pos(1)], vec![Lit::negative(1), Lit::pos(2)]]);
    let (result, _) = solve_with_limits(&units, Limits::nodes(1));
    assert_eq!(result, SatResult::Sat(vec![false, true, true]));
}

#[test]
fn oracle_counts_visited_nodes() {
    let cnf = Cnf::from_clauses([vec![Lit::negative(1)], vec![Lit::negative(2)]]);
    let out = search_solve(&cnf);
    assert_eq!(out.model, Some(vec![false, false, false]));
    // true-first order explores the x1=true subtree (3 nodes) before the answer
    assert_eq!(out.visited, 7);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn dpll_agrees_with_oracle_up_to_twelve_vars(cnf in arb_cnf(12, 60)) {
        let expected = search_is_sat(&cnf);
        match solve(&cnf) {
            SatResult::Sat(model) => {
                prop_assert!(expected);
                prop_assert!(cnf.check_model(&model));
            }
            SatResult::Unsat => prop_assert!(!expected),
            SatResult::Exhausted => prop_assert!(false, "unbounded search exhausted"),
        }
    }

    #[test]
    fn dpll_is_deterministic(cnf in arb_cnf(10, 40)) {
        prop_assert_eq!(solve(&cnf), solve(&cnf));
    }
}
