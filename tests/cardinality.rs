use minelogic::cnf::cardinality::{at_least, at_most, exactly};
use minelogic::cnf::{Cnf, Var};
use minelogic::sat::search::all_models;

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn encode(n: usize, k: usize) -> Cnf {
    let vars = (1..=n as Var).collect::<Vec<_>>();
    let mut cnf = Cnf::new(n as u32);
    for clause in exactly(&vars, k).expect("k <= n") {
        cnf.add_clause(clause);
    }
    cnf
}

#[test]
fn exactly_k_has_one_model_per_k_subset() {
    for n in 0..=6 {
        for k in 0..=n {
            let cnf = encode(n, k);
            let models = all_models(&cnf);
            assert_eq!(models.len(), binomial(n, k), "n={n} k={k}");
            for model in models {
                let ones = model.iter().skip(1).filter(|&&b| b).count();
                assert_eq!(ones, k, "n={n} k={k}");
            }
        }
    }
}

#[test]
fn clause_counts_follow_the_subset_expansion() {
    let vars = [1, 2, 3, 4, 5, 6, 7, 8];
    for k in 1..8 {
        assert_eq!(at_most(&vars, k).len(), binomial(8, k + 1));
        assert_eq!(at_least(&vars, k).len(), binomial(8, 8 - k + 1));
    }
}

#[test]
fn boundary_counts_become_units() {
    let vars = [4, 7, 9];
    let none = exactly(&vars, 0).expect("k=0");
    assert_eq!(none.len(), 3);
    assert!(none.iter().all(|c| c.as_unit().is_some_and(|l| !l.sign)));

    let all = exactly(&vars, 3).expect("k=n");
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|c| c.as_unit().is_some_and(|l| l.sign)));
}

#[test]
fn count_above_size_is_rejected_and_duplicates_collapse() {
    assert!(exactly(&[1, 2], 3).is_none());
    assert!(exactly(&[], 1).is_none());
    assert_eq!(exactly(&[], 0).expect("empty"), Vec::new());

    let dup = exactly(&[1, 1, 2], 2).expect("two distinct vars");
    assert_eq!(dup.len(), 2);
}
