use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexSet;

/// Variables are numbered from 1; index 0 is the unused slot in assignments
/// and models.
pub type Var = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: Var,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: Var, sign: bool) -> Self {
        debug_assert!(var > 0, "variables are numbered from 1");
        Self { var, sign }
    }

    pub fn pos(var: Var) -> Self {
        Self::new(var, true)
    }

    pub fn negative(var: Var) -> Self {
        Self::new(var, false)
    }

    pub fn neg(self) -> Self {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }

    /// Truth value of the literal when its variable is set to `value`.
    pub fn under(self, value: bool) -> bool {
        value == self.sign
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign {
            write!(f, "x{}", self.var)
        } else {
            write!(f, "!x{}", self.var)
        }
    }
}

/// A disjunction of literals.
///
/// Literals are kept sorted by `(var, sign)` with duplicates collapsed, so two
/// clauses over the same literal set compare and hash equal regardless of the
/// order they were written in. The clause with no literals is the constant
/// `FALSE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    pub fn new<I: IntoIterator<Item = Lit>>(lits: I) -> Self {
        let mut lits = lits.into_iter().collect::<Vec<_>>();
        lits.sort_unstable();
        lits.dedup();
        Self { lits }
    }

    pub fn empty() -> Self {
        Self { lits: Vec::new() }
    }

    pub fn unit(lit: Lit) -> Self {
        Self { lits: vec![lit] }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn as_unit(&self) -> Option<Lit> {
        match self.lits.as_slice() {
            [lit] => Some(*lit),
            _ => None,
        }
    }

    pub fn contains(&self, lit: Lit) -> bool {
        self.lits.binary_search(&lit).is_ok()
    }

    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.lits.iter().map(|l| l.var)
    }

    /// True when some variable occurs with both polarities.
    pub fn is_tautology(&self) -> bool {
        // sorted by var first, so complementary pairs are adjacent
        self.lits.windows(2).any(|w| w[0].var == w[1].var)
    }

    /// Disjunction of two clauses, or `None` when the result is a tautology.
    pub fn merge(&self, other: &Clause) -> Option<Clause> {
        let merged = Clause::new(self.lits.iter().chain(other.lits.iter()).copied());
        if merged.is_tautology() {
            None
        } else {
            Some(merged)
        }
    }

    /// Resolves the clause against a set of unit literals.
    ///
    /// Returns `None` when a non-unit clause already contains one of the units
    /// (it is redundant). Otherwise literals whose negation is a unit are removed.
    pub fn resolve_units(&self, units: &BTreeSet<Lit>) -> Option<Clause> {
        if self.len() > 1 && self.lits.iter().any(|l| units.contains(l)) {
            return None;
        }
        Some(Clause {
            lits: self
                .lits
                .iter()
                .copied()
                .filter(|l| !units.contains(&l.neg()))
                .collect(),
        })
    }
}

impl From<Vec<Lit>> for Clause {
    fn from(lits: Vec<Lit>) -> Self {
        Clause::new(lits)
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lits.is_empty() {
            return f.write_str("FALSE");
        }
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{lit}")?;
        }
        Ok(())
    }
}

/// A conjunction of clauses with set semantics.
///
/// Clauses are stored in insertion order. Every pass over the formula
/// (propagation, search, rendering) walks them in that order.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    pub num_vars: u32,
    clauses: IndexSet<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResolution {
    pub units: BTreeSet<Lit>,
    pub rest: Cnf,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: IndexSet::new(),
        }
    }

    pub fn from_clauses<I, C>(clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        let mut cnf = Cnf::new(0);
        for clause in clauses {
            cnf.add_clause(clause);
        }
        cnf
    }

    /// Adds a clause, growing `num_vars` to cover it.
    ///
    /// Tautologies and clauses already present are dropped. Returns whether the
    /// formula changed.
    pub fn add_clause(&mut self, clause: impl Into<Clause>) -> bool {
        let clause = clause.into();
        debug_assert!(
            clause.vars().all(|v| v > 0),
            "variables are numbered from 1"
        );
        if clause.is_tautology() {
            return false;
        }
        if let Some(max) = clause.vars().max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.insert(clause)
    }

    pub fn fresh_var(&mut self) -> u32 {
        self.num_vars = self.num_vars.saturating_add(1);
        self.num_vars
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    /// An empty clause makes the whole formula unsatisfiable.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn vars(&self) -> BTreeSet<Var> {
        self.clauses.iter().flat_map(|c| c.vars()).collect()
    }

    pub fn union(&self, other: &Cnf) -> Cnf {
        let mut out = self.clone();
        out.extend(other.clauses().cloned());
        out.num_vars = out.num_vars.max(other.num_vars);
        out
    }

    /// Copy of the formula with `lit` conjoined as a unit clause.
    pub fn with_unit(&self, lit: Lit) -> Cnf {
        let mut out = self.clone();
        out.add_clause(Clause::unit(lit));
        out
    }

    /// Evaluates the formula under a total model indexed by variable.
    ///
    /// Variables beyond the end of `model` read as false.
    pub fn check_model(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .lits()
                .iter()
                .any(|&lit| lit.under(model.get(lit.var as usize).copied().unwrap_or(false)))
        })
    }

    /// Simplifies the clause set against its own unit clauses until no new
    /// unit appears. The receiver is left untouched.
    pub fn unit_resolution(&self) -> UnitResolution {
        let mut units = self
            .clauses
            .iter()
            .filter_map(Clause::as_unit)
            .collect::<BTreeSet<_>>();
        let mut regular = self
            .clauses
            .iter()
            .filter(|c| c.len() != 1)
            .cloned()
            .collect::<Vec<_>>();

        loop {
            let mut next_units = units.clone();
            let mut next_regular = Vec::new();
            let unit_clauses = units.iter().map(|&l| Clause::unit(l));
            for clause in regular.iter().cloned().chain(unit_clauses) {
                match clause.resolve_units(&units) {
                    None => {}
                    Some(resolved) => match resolved.as_unit() {
                        Some(lit) => {
                            next_units.insert(lit);
                        }
                        None => next_regular.push(resolved),
                    },
                }
            }
            regular = next_regular;
            if next_units.len() == units.len() {
                break;
            }
            units = next_units;
        }

        let mut rest = Cnf::new(self.num_vars);
        rest.extend(regular);
        UnitResolution { units, rest }
    }
}

impl Extend<Clause> for Cnf {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        for clause in iter {
            self.add_clause(clause);
        }
    }
}

impl PartialEq for Cnf {
    fn eq(&self, other: &Self) -> bool {
        // clause-set equality, independent of insertion order
        self.clauses.len() == other.clauses.len()
            && self.clauses.iter().all(|c| other.clauses.contains(c))
    }
}

impl Eq for Cnf {}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = self.clauses.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        rendered.sort();
        f.write_str(&rendered.join("\n"))
    }
}
